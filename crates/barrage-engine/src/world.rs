//! The live-object world: construction, the external operation
//! surface, and the hook re-entry surface.
//!
//! A [`World`] owns the fixed-capacity pool, the row-aligned attribute
//! store, and three intrusive orderings over the same slots:
//!
//! - the global chain, every live object by ascending uid;
//! - the render chain, by ascending (layer, uid);
//! - the collision chains, one per numbered group plus the ungrouped
//!   bucket, each by ascending uid.
//!
//! Every external entry point revalidates its handle against the
//! slot's current uid before touching the slot, so stale handles are
//! reported, never dereferenced. Deletion and kill only mark; slots
//! are freed exclusively by the retirement walk in
//! [`World::after_frame`](crate::world::World#method.after_frame), so
//! handles held by hooks stay resolvable for the rest of the tick.

use std::sync::Arc;

use barrage_arena::{AttrStore, ChainSet, ObjectPool};
use barrage_core::{
    AccessError, AssetCatalog, AssetKind, AssetStore, Attr, BlendMode, Category, CategoryId,
    CollisionGroup, ColorRgba, DrawCommand, ObjectError, ObjectHandle, ObjectStatus,
    PropertyError, SlotId, Uid, Value, WorldOps,
};

use crate::config::{Bounds, ConfigError, WorldConfig};
use crate::metrics::FrameMetrics;
use crate::render::RenderFrame;
use crate::tick::TickScratch;

// ── Ordering keys ───────────────────────────────────────────────────

/// Strict paint order: lower layer first, uid breaking ties.
pub(crate) fn paint_order<'a>(
    layer: &'a [f64],
    uid: &'a [Uid],
) -> impl Fn(SlotId, SlotId) -> bool + 'a {
    move |a, b| {
        let (la, lb) = (layer[a.index()], layer[b.index()]);
        la < lb || (la == lb && uid[a.index()] < uid[b.index()])
    }
}

/// Strict creation order: lower uid first.
pub(crate) fn uid_order(uid: &[Uid]) -> impl Fn(SlotId, SlotId) -> bool + '_ {
    move |a, b| uid[a.index()] < uid[b.index()]
}

// ── Scope ───────────────────────────────────────────────────────────

/// Which ordering [`World::first`] and [`World::next`] walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every live object, in creation order.
    Global,
    /// Members of one numbered collision group, in creation order.
    Group(u16),
    /// Objects that opted out of grouping, in creation order.
    Ungrouped,
}

// ── World ───────────────────────────────────────────────────────────

/// The live-object runtime.
///
/// All mutation happens on the control thread; the parallel stages
/// inside the tick pipeline borrow the storage immutably or split it
/// into disjoint row chunks. Category hooks re-enter the world through
/// [`WorldOps`] and see it mid-tick.
pub struct World {
    pub(crate) pool: ObjectPool,
    pub(crate) store: AttrStore,
    /// Creation ordering over every live object.
    pub(crate) global: ChainSet,
    /// Paint ordering.
    pub(crate) render_list: ChainSet,
    /// One chain per numbered group, plus the ungrouped chain at index
    /// `groups`.
    pub(crate) collision: ChainSet,
    pub(crate) categories: Vec<Arc<dyn Category>>,
    pub(crate) assets: Box<dyn AssetStore>,
    /// Asset kind cached at acquire time, row-aligned with the pool.
    pub(crate) asset_kind: Vec<Option<AssetKind>>,
    pub(crate) bounds: Bounds,
    pub(crate) groups: u16,
    pub(crate) workers: usize,
    /// Render-chain midpoint hint; repaired on retirement, recomputed
    /// after each retirement walk.
    pub(crate) render_mid: Option<SlotId>,
    pub(crate) frame_out: RenderFrame,
    pub(crate) metrics: FrameMetrics,
    /// Set during the render draw walk; gates draw submission.
    pub(crate) in_render_walk: bool,
    pub(crate) scratch: TickScratch,
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("capacity", &self.pool.capacity())
            .field("live", &self.pool.live_count())
            .field("groups", &self.groups)
            .field("workers", &self.workers)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl World {
    /// Construct a world from a validated configuration.
    ///
    /// Consumes the configuration. All storage is allocated up front;
    /// nothing grows afterwards.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let capacity = config.capacity;
        let groups = config.collision_groups;
        let workers = config.resolved_worker_count();
        let assets = config
            .assets
            .unwrap_or_else(|| Box::new(AssetCatalog::new()));
        Ok(Self {
            pool: ObjectPool::new(capacity),
            store: AttrStore::new(capacity),
            global: ChainSet::new(capacity, 1),
            render_list: ChainSet::new(capacity, 1),
            collision: ChainSet::new(capacity, groups as usize + 1),
            categories: Vec::new(),
            assets,
            asset_kind: vec![None; capacity],
            bounds: config.bounds,
            groups,
            workers,
            render_mid: None,
            frame_out: RenderFrame::default(),
            metrics: FrameMetrics::default(),
            in_render_walk: false,
            scratch: TickScratch::default(),
        })
    }

    // ── Registration and construction ───────────────────────────────

    /// Register a behavior category, returning its id.
    ///
    /// Ids are sequential from zero in registration order; categories
    /// are never unregistered.
    pub fn register_category(&mut self, category: Arc<dyn Category>) -> CategoryId {
        let id = CategoryId(self.categories.len() as u32);
        self.categories.push(category);
        id
    }

    /// Create an object of a registered category and fire its
    /// `on_init`.
    ///
    /// The object is linked into all three orderings before the hook
    /// runs, so the hook sees a fully formed object.
    pub fn create(&mut self, category: CategoryId) -> Result<ObjectHandle, AccessError> {
        let handle = self.create_raw(category)?;
        let cat = self.category_arc(handle.slot);
        cat.on_init(self, handle);
        Ok(handle)
    }

    /// Create an object without firing `on_init`.
    ///
    /// The object starts from creation defaults: active, ungrouped,
    /// layer 0, bound and colli set, attribute row zeroed with unit
    /// scales.
    pub fn create_raw(&mut self, category: CategoryId) -> Result<ObjectHandle, AccessError> {
        if category.index() >= self.categories.len() {
            return Err(ObjectError::UnknownCategory { id: category }.into());
        }
        let slot = self.pool.alloc()?;
        self.store.reset_row(slot);
        self.asset_kind[slot.index()] = None;
        self.pool.category[slot.index()] = category;

        // Fresh objects carry the maximal uid, so appending keeps the
        // creation orderings sorted; the paint ordering may need to
        // bubble the object back past higher layers.
        self.global.insert(0, slot);
        self.collision.insert(self.ungrouped_chain(), slot);
        self.render_list.insert(0, slot);
        self.metrics.resort_steps += self.resort_render(slot) as u64;
        self.metrics.spawned += 1;
        Ok(self.pool.handle(slot))
    }

    // ── Removal ─────────────────────────────────────────────────────

    /// Mark an object for silent removal and fire its `on_delete`.
    ///
    /// The object stays linked, readable, and renderable until the
    /// next retirement walk frees it. Already-marked objects are left
    /// as they are and fire nothing.
    pub fn delete(&mut self, obj: ObjectHandle) -> Result<(), ObjectError> {
        let slot = self.pool.resolve(obj)?;
        self.mark_delete_slot(slot);
        Ok(())
    }

    /// Mark an object for player-visible removal and fire its
    /// `on_kill`.
    ///
    /// Same retirement discipline as [`delete`](Self::delete); only
    /// the hook and the recorded status differ.
    pub fn kill(&mut self, obj: ObjectHandle) -> Result<(), ObjectError> {
        let slot = self.pool.resolve(obj)?;
        self.mark_kill_slot(slot);
        Ok(())
    }

    /// Mark every active object in the batch for deletion.
    ///
    /// Stale handles and already-marked objects are skipped silently.
    /// Returns the number of objects actually marked.
    pub fn delete_many(&mut self, objs: &[ObjectHandle]) -> usize {
        let mut marked = 0;
        for &obj in objs {
            if let Ok(slot) = self.pool.resolve(obj) {
                if self.pool.status[slot.index()] == ObjectStatus::Active {
                    self.mark_delete_slot(slot);
                    marked += 1;
                }
            }
        }
        marked
    }

    /// Mark every active object in the batch for kill.
    ///
    /// Stale handles and already-marked objects are skipped silently.
    /// Returns the number of objects actually marked.
    pub fn kill_many(&mut self, objs: &[ObjectHandle]) -> usize {
        let mut marked = 0;
        for &obj in objs {
            if let Ok(slot) = self.pool.resolve(obj) {
                if self.pool.status[slot.index()] == ObjectStatus::Active {
                    self.mark_kill_slot(slot);
                    marked += 1;
                }
            }
        }
        marked
    }

    /// Mark every active member of a numbered group for deletion.
    ///
    /// The member set is snapshotted first, so hooks that move objects
    /// between groups mid-walk cannot disturb the walk. Returns the
    /// number of objects marked.
    pub fn delete_group(&mut self, group: u16) -> Result<usize, ObjectError> {
        self.check_group(group)?;
        let members: Vec<SlotId> = self.collision.iter(group as usize).collect();
        let mut marked = 0;
        for slot in members {
            if self.pool.status[slot.index()] == ObjectStatus::Active {
                self.mark_delete_slot(slot);
                marked += 1;
            }
        }
        Ok(marked)
    }

    /// Mark every active member of a numbered group for kill.
    ///
    /// Same walk discipline as [`delete_group`](Self::delete_group).
    pub fn kill_group(&mut self, group: u16) -> Result<usize, ObjectError> {
        self.check_group(group)?;
        let members: Vec<SlotId> = self.collision.iter(group as usize).collect();
        let mut marked = 0;
        for slot in members {
            if self.pool.status[slot.index()] == ObjectStatus::Active {
                self.mark_kill_slot(slot);
                marked += 1;
            }
        }
        Ok(marked)
    }

    /// Free every object immediately, without firing any hooks.
    ///
    /// Asset references are released, the orderings empty, and the uid
    /// counter restarts at 1. Registered categories, bounds, and the
    /// worker budget survive.
    pub fn reset(&mut self) {
        for i in 0..self.pool.occupied_end() {
            if self.pool.status[i] != ObjectStatus::Free {
                if let Some(id) = self.pool.asset[i] {
                    self.assets.release(id);
                }
            }
        }
        self.asset_kind.fill(None);
        self.pool.reset();
        self.store.reset();
        self.global.reset();
        self.render_list.reset();
        self.collision.reset();
        self.render_mid = None;
        self.frame_out.clear();
        self.metrics = FrameMetrics::default();
    }

    // ── Attribute surface ───────────────────────────────────────────

    /// Read one attribute of a live object.
    pub fn get(&self, obj: ObjectHandle, attr: Attr) -> Result<Value, AccessError> {
        let slot = self.pool.resolve(obj)?;
        let i = slot.index();
        Ok(match attr {
            Attr::X => Value::Num(self.store.x[i]),
            Attr::Y => Value::Num(self.store.y[i]),
            Attr::Dx => Value::Num(self.store.dx[i]),
            Attr::Dy => Value::Num(self.store.dy[i]),
            Attr::Rot => Value::Num(self.store.rot[i]),
            Attr::Omega => Value::Num(self.store.omega[i]),
            Attr::Vx => Value::Num(self.store.vx[i]),
            Attr::Vy => Value::Num(self.store.vy[i]),
            Attr::Ax => Value::Num(self.store.ax[i]),
            Attr::Ay => Value::Num(self.store.ay[i]),
            Attr::Hscale => Value::Num(self.store.hscale[i]),
            Attr::Vscale => Value::Num(self.store.vscale[i]),
            Attr::Layer => Value::Num(self.pool.layer[i]),
            Attr::Group => Value::Group(self.pool.group[i]),
            Attr::Hide => Value::Bool(self.pool.hide[i]),
            Attr::Bound => Value::Bool(self.pool.bound[i]),
            Attr::Navi => Value::Bool(self.store.navi[i]),
            Attr::Colli => Value::Bool(self.pool.colli[i]),
            Attr::Light => Value::Bool(self.pool.light[i]),
            Attr::Timer => Value::Int(self.pool.timer[i]),
            Attr::AniTimer => Value::Int(self.pool.ani_timer[i]),
            Attr::Status => Value::Status(self.pool.status[i]),
            Attr::Category => Value::Category(self.pool.category[i]),
            Attr::A => Value::Num(self.pool.collider[i].a),
            Attr::B => Value::Num(self.pool.collider[i].b),
            Attr::Shape => Value::Shape(self.pool.collider[i].shape),
            Attr::Asset => Value::Asset(self.pool.asset[i]),
            Attr::Blend => Value::Blend(self.pool.blend[i]),
            Attr::Color => Value::Color(self.pool.color[i]),
        })
    }

    /// Write one attribute of a live object.
    ///
    /// Derived attributes reject writes. Layer writes re-sort the
    /// paint ordering and group writes move the object between
    /// collision chains. Asset writes swap reference counts, acquiring
    /// the new asset before releasing the old so a failed acquire
    /// leaves the binding untouched.
    pub fn set(&mut self, obj: ObjectHandle, attr: Attr, value: Value) -> Result<(), AccessError> {
        let slot = self.pool.resolve(obj)?;
        let i = slot.index();
        match attr {
            Attr::X => self.store.x[i] = expect_num(attr, value)?,
            Attr::Y => self.store.y[i] = expect_num(attr, value)?,
            Attr::Rot => self.store.rot[i] = expect_num(attr, value)?,
            Attr::Omega => self.store.omega[i] = expect_num(attr, value)?,
            Attr::Vx => self.store.vx[i] = expect_num(attr, value)?,
            Attr::Vy => self.store.vy[i] = expect_num(attr, value)?,
            Attr::Ax => self.store.ax[i] = expect_num(attr, value)?,
            Attr::Ay => self.store.ay[i] = expect_num(attr, value)?,
            Attr::Hscale => self.store.hscale[i] = expect_num(attr, value)?,
            Attr::Vscale => self.store.vscale[i] = expect_num(attr, value)?,
            Attr::Layer => {
                self.pool.layer[i] = expect_num(attr, value)?;
                let steps = self.resort_render(slot);
                self.metrics.resort_steps += steps as u64;
            }
            Attr::Group => {
                let Value::Group(group) = value else {
                    return Err(wrong_type(attr, "group"));
                };
                if let Some(g) = group.index() {
                    if g >= self.groups {
                        return Err(ObjectError::GroupOutOfRange {
                            group: g,
                            limit: self.groups,
                        }
                        .into());
                    }
                }
                let from = self.chain_of(self.pool.group[i]);
                let to = self.chain_of(group);
                if from != to {
                    self.collision.remove(slot);
                    self.collision.insert(to, slot);
                    let steps = self.resort_collision(slot);
                    self.metrics.resort_steps += steps as u64;
                }
                self.pool.group[i] = group;
            }
            Attr::Hide => self.pool.hide[i] = expect_bool(attr, value)?,
            Attr::Bound => self.pool.bound[i] = expect_bool(attr, value)?,
            Attr::Navi => self.store.navi[i] = expect_bool(attr, value)?,
            Attr::Colli => self.pool.colli[i] = expect_bool(attr, value)?,
            Attr::Light => self.pool.light[i] = expect_bool(attr, value)?,
            Attr::Timer => self.pool.timer[i] = expect_int(attr, value)?,
            Attr::Status => {
                let Value::Status(status) = value else {
                    return Err(wrong_type(attr, "status"));
                };
                if status == ObjectStatus::Free {
                    return Err(PropertyError::FreeStatus.into());
                }
                // Direct status writes fire no hooks.
                self.pool.status[i] = status;
            }
            Attr::Category => {
                let Value::Category(id) = value else {
                    return Err(wrong_type(attr, "category"));
                };
                if id.index() >= self.categories.len() {
                    return Err(ObjectError::UnknownCategory { id }.into());
                }
                self.pool.category[i] = id;
            }
            Attr::A => self.pool.collider[i].a = expect_extent(attr, value)?,
            Attr::B => self.pool.collider[i].b = expect_extent(attr, value)?,
            Attr::Shape => {
                let Value::Shape(shape) = value else {
                    return Err(wrong_type(attr, "shape"));
                };
                self.pool.collider[i].shape = shape;
            }
            Attr::Asset => {
                let Value::Asset(binding) = value else {
                    return Err(wrong_type(attr, "asset"));
                };
                if binding != self.pool.asset[i] {
                    let kind = match binding {
                        Some(id) => Some(self.assets.acquire(id).map_err(AccessError::Asset)?),
                        None => None,
                    };
                    if let Some(old) = self.pool.asset[i] {
                        self.assets.release(old);
                    }
                    self.pool.asset[i] = binding;
                    self.asset_kind[i] = kind;
                }
            }
            Attr::Blend => {
                let Value::Blend(blend) = value else {
                    return Err(wrong_type(attr, "blend"));
                };
                self.pool.blend[i] = blend;
            }
            Attr::Color => {
                let Value::Color(color) = value else {
                    return Err(wrong_type(attr, "color"));
                };
                self.pool.color[i] = color;
            }
            Attr::Dx | Attr::Dy | Attr::AniTimer => {
                return Err(PropertyError::ReadOnly { attr }.into());
            }
        }
        Ok(())
    }

    /// Whether the handle still refers to a live object.
    ///
    /// Marked objects are still live until retirement.
    pub fn is_valid(&self, obj: ObjectHandle) -> bool {
        self.pool.resolve(obj).is_ok()
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// First object of a scope's ordering.
    ///
    /// Out-of-range group scopes read as empty.
    pub fn first(&self, scope: Scope) -> Option<ObjectHandle> {
        let slot = match scope {
            Scope::Global => self.global.first(0),
            Scope::Group(g) => {
                if g >= self.groups {
                    return None;
                }
                self.collision.first(g as usize)
            }
            Scope::Ungrouped => self.collision.first(self.ungrouped_chain()),
        }?;
        Some(self.pool.handle(slot))
    }

    /// The object after `obj` in a scope's ordering.
    ///
    /// Group scopes yield a successor only while the object is a
    /// member of that scope's chain.
    pub fn next(&self, scope: Scope, obj: ObjectHandle) -> Result<Option<ObjectHandle>, ObjectError> {
        let slot = self.pool.resolve(obj)?;
        let succ = match scope {
            Scope::Global => self.global.next_of(slot),
            Scope::Group(g) => {
                if g >= self.groups || self.pool.group[slot.index()] != CollisionGroup::Group(g) {
                    return Ok(None);
                }
                self.collision.next_of(slot)
            }
            Scope::Ungrouped => {
                if self.pool.group[slot.index()] != CollisionGroup::None {
                    return Ok(None);
                }
                self.collision.next_of(slot)
            }
        };
        Ok(succ.map(|s| self.pool.handle(s)))
    }

    /// Snapshot of a numbered group's members, in creation order.
    pub fn group_members(&self, group: u16) -> Result<Vec<ObjectHandle>, ObjectError> {
        self.check_group(group)?;
        Ok(self
            .collision
            .iter(group as usize)
            .map(|slot| self.pool.handle(slot))
            .collect())
    }

    /// Direction from `a` to `b` in radians.
    pub fn angle(&self, a: ObjectHandle, b: ObjectHandle) -> Result<f64, ObjectError> {
        let ia = self.pool.resolve(a)?.index();
        let ib = self.pool.resolve(b)?.index();
        Ok((self.store.y[ib] - self.store.y[ia]).atan2(self.store.x[ib] - self.store.x[ia]))
    }

    /// Euclidean distance between object centres.
    pub fn distance(&self, a: ObjectHandle, b: ObjectHandle) -> Result<f64, ObjectError> {
        let ia = self.pool.resolve(a)?.index();
        let ib = self.pool.resolve(b)?.index();
        Ok((self.store.x[ib] - self.store.x[ia]).hypot(self.store.y[ib] - self.store.y[ia]))
    }

    /// Speed and heading of an object's velocity, in that order.
    pub fn velocity_polar(&self, obj: ObjectHandle) -> Result<(f64, f64), ObjectError> {
        let i = self.pool.resolve(obj)?.index();
        let (vx, vy) = (self.store.vx[i], self.store.vy[i]);
        Ok((vx.hypot(vy), vy.atan2(vx)))
    }

    /// Set velocity from speed and heading; `face` also points the
    /// rotation along the heading.
    pub fn set_velocity_polar(
        &mut self,
        obj: ObjectHandle,
        speed: f64,
        heading: f64,
        face: bool,
    ) -> Result<(), ObjectError> {
        let i = self.pool.resolve(obj)?.index();
        let (s, c) = heading.sin_cos();
        self.store.vx[i] = speed * c;
        self.store.vy[i] = speed * s;
        if face {
            self.store.rot[i] = heading;
        }
        Ok(())
    }

    /// Position at the end of the previous integration.
    pub fn last_position(&self, obj: ObjectHandle) -> Result<(f64, f64), ObjectError> {
        let i = self.pool.resolve(obj)?.index();
        Ok((self.store.last_x[i], self.store.last_y[i]))
    }

    /// Overwrite the previous-integration position, which feeds the
    /// next displacement derivation.
    pub fn set_last_position(&mut self, obj: ObjectHandle, x: f64, y: f64) -> Result<(), ObjectError> {
        let i = self.pool.resolve(obj)?.index();
        self.store.last_x[i] = x;
        self.store.last_y[i] = y;
        Ok(())
    }

    /// Whether the object's centre lies inside the rectangle, edges
    /// inclusive.
    pub fn box_check(
        &self,
        obj: ObjectHandle,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
    ) -> Result<bool, ObjectError> {
        let i = self.pool.resolve(obj)?.index();
        let (x, y) = (self.store.x[i], self.store.y[i]);
        Ok(x >= left && x <= right && y >= bottom && y <= top)
    }

    /// Set blend mode and vertex color together.
    pub fn set_render_state(
        &mut self,
        obj: ObjectHandle,
        blend: BlendMode,
        color: ColorRgba,
    ) -> Result<(), ObjectError> {
        let i = self.pool.resolve(obj)?.index();
        self.pool.blend[i] = blend;
        self.pool.color[i] = color;
        Ok(())
    }

    // ── Introspection ───────────────────────────────────────────────

    /// Fixed pool capacity.
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Number of live objects, marked ones included until retirement.
    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    /// Number of numbered collision groups.
    pub fn group_count(&self) -> u16 {
        self.groups
    }

    /// Resolved fork-join worker count.
    pub fn worker_count(&self) -> usize {
        self.workers
    }

    /// Counters for the current tick window.
    pub fn metrics(&self) -> &FrameMetrics {
        &self.metrics
    }

    /// The cull rectangle.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Replace the cull rectangle.
    pub fn set_bounds(&mut self, bounds: Bounds) -> Result<(), ConfigError> {
        if !bounds.is_ordered() {
            return Err(ConfigError::InvalidBounds { bounds });
        }
        self.bounds = bounds;
        Ok(())
    }

    /// The render output of the most recent build.
    pub fn render_frame(&self) -> &RenderFrame {
        &self.frame_out
    }

    // ── Internal helpers ────────────────────────────────────────────

    /// The registered category behind a slot's category column.
    pub(crate) fn category_arc(&self, slot: SlotId) -> Arc<dyn Category> {
        Arc::clone(&self.categories[self.pool.category[slot.index()].index()])
    }

    /// Mark a slot for deletion and fire its `on_delete`. Inert unless
    /// the object is active, which terminates hook recursion.
    pub(crate) fn mark_delete_slot(&mut self, slot: SlotId) {
        if self.pool.status[slot.index()] != ObjectStatus::Active {
            return;
        }
        self.pool.status[slot.index()] = ObjectStatus::MarkDelete;
        let handle = self.pool.handle(slot);
        let cat = self.category_arc(slot);
        cat.on_delete(self, handle);
    }

    /// Mark a slot for kill and fire its `on_kill`. Inert unless the
    /// object is active.
    pub(crate) fn mark_kill_slot(&mut self, slot: SlotId) {
        if self.pool.status[slot.index()] != ObjectStatus::Active {
            return;
        }
        self.pool.status[slot.index()] = ObjectStatus::MarkKill;
        let handle = self.pool.handle(slot);
        let cat = self.category_arc(slot);
        cat.on_kill(self, handle);
    }

    /// Bubble a slot to its paint-ordered position, using the midpoint
    /// hint. Returns positions walked.
    pub(crate) fn resort_render(&mut self, slot: SlotId) -> usize {
        let order = paint_order(&self.pool.layer, &self.pool.uid);
        self.render_list.resort_by(slot, self.render_mid, order)
    }

    /// Bubble a slot to its creation-ordered position in its collision
    /// chain. Returns positions walked.
    pub(crate) fn resort_collision(&mut self, slot: SlotId) -> usize {
        let order = uid_order(&self.pool.uid);
        self.collision.resort_by(slot, None, order)
    }

    pub(crate) fn chain_of(&self, group: CollisionGroup) -> usize {
        match group.index() {
            Some(g) => g as usize,
            None => self.ungrouped_chain(),
        }
    }

    pub(crate) fn ungrouped_chain(&self) -> usize {
        self.groups as usize
    }

    pub(crate) fn check_group(&self, group: u16) -> Result<(), ObjectError> {
        if group >= self.groups {
            return Err(ObjectError::GroupOutOfRange {
                group,
                limit: self.groups,
            });
        }
        Ok(())
    }
}

impl WorldOps for World {
    fn get(&self, obj: ObjectHandle, attr: Attr) -> Result<Value, AccessError> {
        World::get(self, obj, attr)
    }

    fn set(&mut self, obj: ObjectHandle, attr: Attr, value: Value) -> Result<(), AccessError> {
        World::set(self, obj, attr, value)
    }

    fn is_valid(&self, obj: ObjectHandle) -> bool {
        World::is_valid(self, obj)
    }

    fn spawn(&mut self, category: CategoryId) -> Result<ObjectHandle, AccessError> {
        self.create(category)
    }

    fn delete(&mut self, obj: ObjectHandle) -> Result<(), ObjectError> {
        World::delete(self, obj)
    }

    fn kill(&mut self, obj: ObjectHandle) -> Result<(), ObjectError> {
        World::kill(self, obj)
    }

    fn angle(&self, a: ObjectHandle, b: ObjectHandle) -> Result<f64, ObjectError> {
        World::angle(self, a, b)
    }

    fn distance(&self, a: ObjectHandle, b: ObjectHandle) -> Result<f64, ObjectError> {
        World::distance(self, a, b)
    }

    fn submit_draw(&mut self, cmd: DrawCommand) {
        if self.in_render_walk {
            self.frame_out.draws.push(cmd);
        } else {
            self.metrics.dropped_draws += 1;
        }
    }
}

// ── Value coercion helpers ──────────────────────────────────────────

fn wrong_type(attr: Attr, expected: &'static str) -> AccessError {
    PropertyError::WrongType { attr, expected }.into()
}

fn expect_num(attr: Attr, value: Value) -> Result<f64, AccessError> {
    match value {
        Value::Num(v) => Ok(v),
        _ => Err(wrong_type(attr, "number")),
    }
}

fn expect_int(attr: Attr, value: Value) -> Result<i32, AccessError> {
    match value {
        Value::Int(v) => Ok(v),
        _ => Err(wrong_type(attr, "integer")),
    }
}

fn expect_bool(attr: Attr, value: Value) -> Result<bool, AccessError> {
    match value {
        Value::Bool(v) => Ok(v),
        _ => Err(wrong_type(attr, "boolean")),
    }
}

/// Collider half extents must be non-negative and never NaN.
fn expect_extent(attr: Attr, value: Value) -> Result<f64, AccessError> {
    let v = expect_num(attr, value)?;
    if v.is_nan() || v < 0.0 {
        return Err(PropertyError::NegativeExtent { attr, value: v }.into());
    }
    Ok(v)
}
