//! The per-tick pipeline stages.
//!
//! Each stage is a method on [`World`]; the host drives them in order:
//!
//! 1. [`frame`](World::frame) — behavior hooks, then parallel motion
//!    integration over the occupied prefix.
//! 2. [`bound_check`](World::bound_check) — parallel out-of-bounds
//!    flagging, then slot-order marking on the control thread.
//! 3. [`collide_groups`](World::collide_groups) /
//!    [`collide_object_group`](World::collide_object_group) — one call
//!    per group pairing the host cares about.
//! 4. [`render`](World::render) — visible scan, parallel transform
//!    refresh, sequential draw walk.
//! 5. [`after_frame`](World::after_frame) — timer advance and
//!    retirement of marked objects.
//!
//! Hooks run on the control thread only. The parallel sections read
//! shared storage or disjoint row chunks and report back to the control
//! thread, so every observable effect lands in a deterministic order
//! regardless of the worker count.

use std::mem;
use std::sync::Arc;

use barrage_core::{
    Affine2, Category, CategoryId, DrawCommand, HookKind, LightCommand, ObjectError,
    ObjectHandle, ObjectStatus, SlotId,
};

use crate::matcher;
use crate::render::RenderFrame;
use crate::workers::{partition_ranges, run_partitions};
use crate::world::World;

/// Reusable stage buffers, drained and restored around hook re-entry.
#[derive(Debug, Default)]
pub(crate) struct TickScratch {
    lhs: Vec<SlotId>,
    rhs: Vec<SlotId>,
    visible: Vec<SlotId>,
    transforms: Vec<Affine2>,
}

impl World {
    /// Behavior update: walk every live object in creation order firing
    /// frame hooks, then integrate motion in parallel.
    ///
    /// Marked objects still tick; they stay part of the world until
    /// retirement. Objects spawned by a hook append to the walk and are
    /// visited the same frame. Begins a new metrics window.
    pub fn frame(&mut self) {
        self.metrics.begin_window();

        let mut cache: Option<(CategoryId, Arc<dyn Category>)> = None;
        let mut cursor = self.global.first(0);
        while let Some(slot) = cursor {
            let cat = self.cached_category(&mut cache, slot);
            if cat.frame_hook() != HookKind::Default {
                let handle = self.pool.handle(slot);
                cat.on_frame(self, handle);
                self.metrics.frame_hooks += 1;
            }
            // Successor read after the hook: hooks mark but never
            // unlink, so the cursor object is still chained.
            cursor = self.global.next_of(slot);
        }

        let end = self.pool.occupied_end();
        let ranges = partition_ranges(end, self.workers);
        let chunks = self.store.chunks_mut(&ranges);
        run_partitions(chunks, |_, mut chunk| chunk.integrate());
        self.metrics.integrated_rows = end;
    }

    /// Cull stage: flag active, bound objects outside the world
    /// rectangle in parallel, then mark them in slot order.
    ///
    /// Marking runs on the control thread so `on_delete` hooks fire in
    /// ascending slot order for any worker count.
    pub fn bound_check(&mut self) {
        let end = self.pool.occupied_end();
        let ranges = partition_ranges(end, self.workers);
        let flagged = {
            let pool = &self.pool;
            let store = &self.store;
            let bounds = self.bounds;
            run_partitions(ranges.into_vec(), move |_, range| {
                let mut out = Vec::new();
                for i in range {
                    if pool.status[i] == ObjectStatus::Active
                        && pool.bound[i]
                        && !bounds.contains(store.x[i], store.y[i])
                    {
                        out.push(SlotId(i as u32));
                    }
                }
                out
            })
        };
        for batch in flagged {
            for slot in batch {
                // A hook fired for an earlier slot may have marked this
                // one already.
                if self.pool.status[slot.index()] == ObjectStatus::Active {
                    self.mark_delete_slot(slot);
                    self.metrics.bound_marks += 1;
                }
            }
        }
    }

    /// Collision pass for one ordered group pairing.
    ///
    /// Candidates are the colli-flagged members of each chain. Distinct
    /// groups are matched in parallel over the flattened candidate
    /// grid; hits fire on the lhs side in ascending pair order. A group
    /// paired with itself is matched sequentially, each unordered pair
    /// tested once and fired from the earlier chain position.
    pub fn collide_groups(&mut self, lhs_group: u16, rhs_group: u16) -> Result<(), ObjectError> {
        self.check_group(lhs_group)?;
        self.check_group(rhs_group)?;

        let mut lhs = mem::take(&mut self.scratch.lhs);
        self.collect_colli(lhs_group as usize, &mut lhs);
        if lhs_group == rhs_group {
            let n = lhs.len() as u64;
            self.metrics.candidate_pairs += n * n.saturating_sub(1) / 2;
            let hits = matcher::match_within(&self.pool, &self.store, &lhs);
            lhs.clear();
            self.scratch.lhs = lhs;
            self.fire_contacts(hits);
        } else {
            let mut rhs = mem::take(&mut self.scratch.rhs);
            self.collect_colli(rhs_group as usize, &mut rhs);
            self.metrics.candidate_pairs += (lhs.len() * rhs.len()) as u64;
            let buffers =
                matcher::match_cross(&self.pool, &self.store, &lhs, &rhs, self.workers);
            lhs.clear();
            rhs.clear();
            self.scratch.lhs = lhs;
            self.scratch.rhs = rhs;
            for hits in buffers {
                self.fire_contacts(hits);
            }
        }
        Ok(())
    }

    /// Collision pass for one object against a numbered group.
    ///
    /// Hits fire on the object's side in chain order. The object is
    /// skipped as its own partner, and nothing fires when its colli
    /// flag is clear.
    pub fn collide_object_group(
        &mut self,
        obj: ObjectHandle,
        group: u16,
    ) -> Result<(), ObjectError> {
        let slot = self.pool.resolve(obj)?;
        self.check_group(group)?;
        if !self.pool.colli[slot.index()] {
            return Ok(());
        }
        let mut rhs = mem::take(&mut self.scratch.rhs);
        self.collect_colli(group as usize, &mut rhs);
        self.metrics.candidate_pairs += rhs.len() as u64;
        let hits = matcher::match_one(&self.pool, &self.store, slot, &rhs);
        rhs.clear();
        self.scratch.rhs = rhs;
        self.fire_contacts(hits);
        Ok(())
    }

    /// Render build: scan the paint ordering for visible objects and
    /// lights, refresh their transforms in parallel, then walk the
    /// snapshot emitting draws.
    ///
    /// Default-path objects with a bound asset emit one
    /// [`DrawCommand`]; hooked objects have their `on_render` invoked
    /// instead and may submit draws themselves.
    pub fn render(&mut self) -> &RenderFrame {
        self.frame_out.clear();

        let mut visible = mem::take(&mut self.scratch.visible);
        visible.clear();
        let mut cursor = self.render_list.first(0);
        while let Some(slot) = cursor {
            let i = slot.index();
            if !self.pool.hide[i] {
                visible.push(slot);
                if self.pool.light[i] {
                    self.frame_out.lights.push(LightCommand {
                        obj: self.pool.handle(slot),
                        x: self.store.x[i],
                        y: self.store.y[i],
                        color: self.pool.color[i],
                    });
                }
            }
            cursor = self.render_list.next_of(slot);
        }

        let mut transforms = mem::take(&mut self.scratch.transforms);
        transforms.clear();
        {
            let store = &self.store;
            let slots = visible.as_slice();
            let ranges = partition_ranges(slots.len(), self.workers);
            let buffers = run_partitions(ranges.into_vec(), move |_, range| {
                let mut out = Vec::with_capacity(range.len());
                for k in range {
                    let i = slots[k].index();
                    out.push(Affine2::from_srt(
                        store.x[i],
                        store.y[i],
                        store.rot[i],
                        store.hscale[i],
                        store.vscale[i],
                    ));
                }
                out
            });
            for buffer in buffers {
                transforms.extend(buffer);
            }
        }

        self.in_render_walk = true;
        let mut cache: Option<(CategoryId, Arc<dyn Category>)> = None;
        for (k, &slot) in visible.iter().enumerate() {
            let cat = self.cached_category(&mut cache, slot);
            let handle = self.pool.handle(slot);
            if cat.render_hook() == HookKind::Default {
                let i = slot.index();
                if let (Some(asset), Some(kind)) = (self.pool.asset[i], self.asset_kind[i]) {
                    self.frame_out.draws.push(DrawCommand {
                        obj: handle,
                        asset,
                        kind,
                        transform: transforms[k],
                        blend: self.pool.blend[i],
                        color: self.pool.color[i],
                        frame: self.pool.ani_timer[i],
                    });
                }
            } else {
                cat.on_render(self, handle);
            }
        }
        self.in_render_walk = false;

        self.metrics.draw_commands = self.frame_out.draws.len();
        self.metrics.lights = self.frame_out.lights.len();

        visible.clear();
        transforms.clear();
        self.scratch.visible = visible;
        self.scratch.transforms = transforms;
        &self.frame_out
    }

    /// End of frame: advance every object's timers, retire marked
    /// objects, and recompute the render midpoint hint.
    ///
    /// Retirement frees the slot with no further hooks; the removal
    /// hooks already fired at mark time.
    pub fn after_frame(&mut self) {
        let mut cursor = self.global.first(0);
        while let Some(slot) = cursor {
            let next = self.global.next_of(slot);
            let i = slot.index();
            self.pool.timer[i] = self.pool.timer[i].wrapping_add(1);
            self.pool.ani_timer[i] = self.pool.ani_timer[i].wrapping_add(1);
            if self.pool.status[i].is_marked() {
                self.retire(slot);
            }
            cursor = next;
        }

        let live = self.pool.live_count();
        self.render_mid = if live > 32 {
            let mut mid = self.render_list.first(0);
            for _ in 0..live / 2 {
                mid = mid.and_then(|slot| self.render_list.next_of(slot));
            }
            mid
        } else {
            None
        };

        self.metrics.tick += 1;
        self.metrics.live_objects = live;
    }

    // ── Stage internals ─────────────────────────────────────────────

    /// Resolve a slot's category, reusing the previous answer across
    /// consecutive same-category runs.
    ///
    /// Safe to reuse even when hooks register categories or rebind the
    /// column mid-walk: the registry is append-only and the tag is
    /// re-read per slot.
    fn cached_category(
        &self,
        cache: &mut Option<(CategoryId, Arc<dyn Category>)>,
        slot: SlotId,
    ) -> Arc<dyn Category> {
        let id = self.pool.category[slot.index()];
        match cache {
            Some((cached_id, cat)) if *cached_id == id => Arc::clone(cat),
            _ => {
                let cat = self.category_arc(slot);
                *cache = Some((id, Arc::clone(&cat)));
                cat
            }
        }
    }

    /// Collect a chain's colli-flagged members in chain order.
    fn collect_colli(&self, chain: usize, out: &mut Vec<SlotId>) {
        out.clear();
        out.extend(
            self.collision
                .iter(chain)
                .filter(|slot| self.pool.colli[slot.index()]),
        );
    }

    /// Deliver contact hits in order, invoking hooked sides.
    ///
    /// Every hit counts as a contact; only categories with a non-default
    /// collide tag get the callback.
    fn fire_contacts<I>(&mut self, hits: I)
    where
        I: IntoIterator<Item = (SlotId, SlotId)>,
    {
        let mut cache: Option<(CategoryId, Arc<dyn Category>)> = None;
        for (a, b) in hits {
            self.metrics.contacts += 1;
            let cat = self.cached_category(&mut cache, a);
            if cat.collide_hook() != HookKind::Default {
                let ha = self.pool.handle(a);
                let hb = self.pool.handle(b);
                cat.on_collide(self, ha, hb);
            }
        }
    }

    /// Unlink a marked slot from all orderings and free it.
    fn retire(&mut self, slot: SlotId) {
        // Keep the midpoint hint linked: advance it to the paint-order
        // successor before unlinking.
        if self.render_mid == Some(slot) {
            self.render_mid = self.render_list.next_of(slot);
        }
        self.global.remove(slot);
        self.render_list.remove(slot);
        self.collision.remove(slot);
        let i = slot.index();
        if let Some(id) = self.pool.asset[i] {
            self.assets.release(id);
        }
        self.asset_kind[i] = None;
        self.store.reset_row(slot);
        self.pool.release(slot);
        self.metrics.retired += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;
    use std::sync::atomic::{AtomicBool, Ordering};

    use barrage_core::{
        AssetId, AssetKind, Attr, BlendMode, CollisionGroup, ColorRgba, Value, WorldOps,
    };
    use barrage_test_utils::{
        CountingAssets, EventLog, HookEvent, InertCategory, RecordingCategory,
    };

    use crate::config::{Bounds, WorldConfig};

    fn test_config(workers: usize) -> WorldConfig {
        WorldConfig {
            capacity: 64,
            collision_groups: 4,
            workers: NonZeroUsize::new(workers),
            ..WorldConfig::default()
        }
    }

    fn recording_world(workers: usize) -> (World, CategoryId, EventLog) {
        let log = EventLog::new();
        let mut world = World::new(test_config(workers)).unwrap();
        let cat = world.register_category(Arc::new(RecordingCategory::new("probe", log.clone())));
        (world, cat, log)
    }

    fn place(world: &mut World, h: ObjectHandle, x: f64, y: f64) {
        world.set(h, Attr::X, Value::Num(x)).unwrap();
        world.set(h, Attr::Y, Value::Num(y)).unwrap();
    }

    fn circle(world: &mut World, h: ObjectHandle, r: f64) {
        world.set(h, Attr::A, Value::Num(r)).unwrap();
    }

    fn join_group(world: &mut World, h: ObjectHandle, g: u16) {
        world
            .set(h, Attr::Group, Value::Group(CollisionGroup::Group(g)))
            .unwrap();
    }

    #[test]
    fn frame_fires_hooks_in_creation_order() {
        let (mut world, cat, log) = recording_world(2);
        let a = world.create(cat).unwrap();
        let b = world.create(cat).unwrap();
        let c = world.create(cat).unwrap();
        log.take();
        world.frame();
        assert_eq!(
            log.take(),
            vec![HookEvent::Frame(a), HookEvent::Frame(b), HookEvent::Frame(c)]
        );
        assert_eq!(world.metrics().frame_hooks, 3);
        assert_eq!(world.metrics().integrated_rows, 3);
    }

    #[test]
    fn frame_integrates_motion_and_derives_displacement() {
        let (mut world, cat, _log) = recording_world(1);
        let h = world.create(cat).unwrap();
        world.set(h, Attr::Vx, Value::Num(3.0)).unwrap();
        world.set(h, Attr::Vy, Value::Num(4.0)).unwrap();
        world.set(h, Attr::Ax, Value::Num(1.0)).unwrap();
        world.frame();
        // Acceleration applies before the position step.
        assert_eq!(world.get(h, Attr::X).unwrap(), Value::Num(4.0));
        assert_eq!(world.get(h, Attr::Y).unwrap(), Value::Num(4.0));
        assert_eq!(world.get(h, Attr::Dx).unwrap(), Value::Num(4.0));
        assert_eq!(world.get(h, Attr::Dy).unwrap(), Value::Num(4.0));
        assert_eq!(world.last_position(h).unwrap(), (4.0, 4.0));
        world.frame();
        assert_eq!(world.get(h, Attr::X).unwrap(), Value::Num(9.0));
        assert_eq!(world.get(h, Attr::Dx).unwrap(), Value::Num(5.0));
        assert_eq!(world.last_position(h).unwrap(), (9.0, 8.0));
    }

    #[test]
    fn navigation_points_rotation_along_displacement() {
        let (mut world, cat, _log) = recording_world(1);
        let h = world.create(cat).unwrap();
        world.set(h, Attr::Navi, Value::Bool(true)).unwrap();
        world.set(h, Attr::Vx, Value::Num(1.0)).unwrap();
        world.set(h, Attr::Vy, Value::Num(1.0)).unwrap();
        world.frame();
        assert_eq!(
            world.get(h, Attr::Rot).unwrap(),
            Value::Num(std::f64::consts::FRAC_PI_4)
        );
    }

    #[test]
    fn hook_spawned_objects_tick_the_same_frame() {
        struct SpawnOnce {
            child: CategoryId,
            done: AtomicBool,
        }

        impl Category for SpawnOnce {
            fn name(&self) -> &str {
                "spawn-once"
            }
            fn frame_hook(&self) -> HookKind {
                HookKind::FastPath
            }
            fn on_frame(&self, world: &mut dyn WorldOps, _obj: ObjectHandle) {
                if !self.done.swap(true, Ordering::Relaxed) {
                    world.spawn(self.child).unwrap();
                }
            }
        }

        let log = EventLog::new();
        let mut world = World::new(test_config(1)).unwrap();
        let child = world.register_category(Arc::new(RecordingCategory::new("child", log.clone())));
        let parent = world.register_category(Arc::new(SpawnOnce {
            child,
            done: AtomicBool::new(false),
        }));
        world.create(parent).unwrap();
        world.frame();
        // The child appended to the walk, so it was initialized and
        // then ticked within the same frame.
        let events = log.take();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], HookEvent::Init(_)));
        assert!(matches!(events[1], HookEvent::Frame(_)));
        assert_eq!(world.metrics().frame_hooks, 2);
    }

    #[test]
    fn marked_objects_still_tick_until_retirement() {
        let (mut world, cat, log) = recording_world(1);
        let h = world.create(cat).unwrap();
        world.delete(h).unwrap();
        log.take();
        world.frame();
        assert_eq!(log.take(), vec![HookEvent::Frame(h)]);
    }

    #[test]
    fn bound_check_marks_only_active_bound_objects() {
        let (mut world, cat, log) = recording_world(3);
        let escaping = world.create(cat).unwrap();
        place(&mut world, escaping, 2000.0, 0.0);
        let unbound = world.create(cat).unwrap();
        place(&mut world, unbound, 2000.0, 0.0);
        world.set(unbound, Attr::Bound, Value::Bool(false)).unwrap();
        let inside = world.create(cat).unwrap();
        place(&mut world, inside, 10.0, 10.0);
        log.take();

        world.bound_check();
        assert_eq!(log.take(), vec![HookEvent::Delete(escaping)]);
        assert_eq!(world.metrics().bound_marks, 1);
        assert_eq!(
            world.get(escaping, Attr::Status).unwrap(),
            Value::Status(ObjectStatus::MarkDelete)
        );
        assert_eq!(
            world.get(unbound, Attr::Status).unwrap(),
            Value::Status(ObjectStatus::Active)
        );
    }

    #[test]
    fn bound_check_is_edge_inclusive() {
        let mut world = World::new(WorldConfig {
            capacity: 8,
            bounds: Bounds::new(-10.0, 10.0, -10.0, 10.0),
            ..WorldConfig::default()
        })
        .unwrap();
        let cat = world.register_category(Arc::new(InertCategory::new("inert")));
        let on_edge = world.create(cat).unwrap();
        place(&mut world, on_edge, 10.0, -10.0);
        world.bound_check();
        assert_eq!(
            world.get(on_edge, Attr::Status).unwrap(),
            Value::Status(ObjectStatus::Active)
        );
    }

    #[test]
    fn cross_group_contacts_fire_on_the_lhs_side() {
        let (mut world, cat, log) = recording_world(2);
        let a = world.create(cat).unwrap();
        let b = world.create(cat).unwrap();
        join_group(&mut world, a, 1);
        join_group(&mut world, b, 2);
        circle(&mut world, a, 1.0);
        circle(&mut world, b, 1.0);
        place(&mut world, b, 1.5, 0.0);
        log.take();

        world.collide_groups(1, 2).unwrap();
        assert_eq!(log.take(), vec![HookEvent::Collide(a, b)]);
        assert_eq!(world.metrics().contacts, 1);
        assert_eq!(world.metrics().candidate_pairs, 1);

        // Swapping the pairing swaps the firing side.
        world.collide_groups(2, 1).unwrap();
        assert_eq!(log.take(), vec![HookEvent::Collide(b, a)]);
    }

    #[test]
    fn same_group_pairs_fire_once_from_the_earlier_member() {
        let (mut world, cat, log) = recording_world(2);
        let a = world.create(cat).unwrap();
        let b = world.create(cat).unwrap();
        join_group(&mut world, a, 1);
        join_group(&mut world, b, 1);
        circle(&mut world, a, 1.0);
        circle(&mut world, b, 1.0);
        log.take();

        world.collide_groups(1, 1).unwrap();
        assert_eq!(log.take(), vec![HookEvent::Collide(a, b)]);
        assert_eq!(world.metrics().candidate_pairs, 1);
    }

    #[test]
    fn clear_colli_flags_leave_the_candidate_set() {
        let (mut world, cat, log) = recording_world(2);
        let a = world.create(cat).unwrap();
        let b = world.create(cat).unwrap();
        join_group(&mut world, a, 1);
        join_group(&mut world, b, 2);
        circle(&mut world, a, 1.0);
        circle(&mut world, b, 1.0);
        world.set(b, Attr::Colli, Value::Bool(false)).unwrap();
        log.take();

        world.collide_groups(1, 2).unwrap();
        assert!(log.is_empty());
        assert_eq!(world.metrics().candidate_pairs, 0);
    }

    #[test]
    fn unknown_groups_are_rejected_before_matching() {
        let (mut world, _cat, _log) = recording_world(1);
        assert_eq!(
            world.collide_groups(0, 9).unwrap_err(),
            ObjectError::GroupOutOfRange { group: 9, limit: 4 }
        );
    }

    #[test]
    fn object_group_sweep_skips_self_and_fires_subject_side() {
        let (mut world, cat, log) = recording_world(1);
        let a = world.create(cat).unwrap();
        let b = world.create(cat).unwrap();
        join_group(&mut world, a, 1);
        join_group(&mut world, b, 1);
        circle(&mut world, a, 1.0);
        circle(&mut world, b, 1.0);
        log.take();

        world.collide_object_group(a, 1).unwrap();
        assert_eq!(log.take(), vec![HookEvent::Collide(a, b)]);
        assert_eq!(world.metrics().candidate_pairs, 2);

        world.set(a, Attr::Colli, Value::Bool(false)).unwrap();
        world.collide_object_group(a, 1).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn render_emits_default_draws_in_paint_order() {
        let assets = CountingAssets::new();
        assets.register(AssetId(1), AssetKind::Sprite);
        let mut world = World::new(WorldConfig {
            capacity: 16,
            assets: Some(Box::new(assets)),
            workers: NonZeroUsize::new(2),
            ..WorldConfig::default()
        })
        .unwrap();
        let cat = world.register_category(Arc::new(InertCategory::new("inert")));

        let top = world.create(cat).unwrap();
        world.set(top, Attr::Layer, Value::Num(5.0)).unwrap();
        world
            .set(top, Attr::Asset, Value::Asset(Some(AssetId(1))))
            .unwrap();
        place(&mut world, top, 3.0, 4.0);

        let bottom = world.create(cat).unwrap();
        world.set(bottom, Attr::Layer, Value::Num(1.0)).unwrap();
        world
            .set(bottom, Attr::Asset, Value::Asset(Some(AssetId(1))))
            .unwrap();

        let hidden = world.create(cat).unwrap();
        world
            .set(hidden, Attr::Asset, Value::Asset(Some(AssetId(1))))
            .unwrap();
        world.set(hidden, Attr::Hide, Value::Bool(true)).unwrap();

        let bare = world.create(cat).unwrap();
        world.set(bare, Attr::Light, Value::Bool(true)).unwrap();

        let frame = world.render();
        // Lower layer first; the hidden object is skipped entirely and
        // the assetless one contributes only its light.
        assert_eq!(frame.draws.len(), 2);
        assert_eq!(frame.draws[0].obj, bottom);
        assert_eq!(frame.draws[1].obj, top);
        assert_eq!(frame.draws[1].transform, Affine2::from_srt(3.0, 4.0, 0.0, 1.0, 1.0));
        assert_eq!(frame.draws[0].kind, AssetKind::Sprite);
        assert_eq!(frame.lights.len(), 1);
        assert_eq!(frame.lights[0].obj, bare);
        assert_eq!(world.metrics().draw_commands, 2);
        assert_eq!(world.metrics().lights, 1);
    }

    #[test]
    fn scripted_render_hooks_submit_within_the_walk() {
        struct Beacon;

        impl Category for Beacon {
            fn name(&self) -> &str {
                "beacon"
            }
            fn render_hook(&self) -> HookKind {
                HookKind::Scripted
            }
            fn on_render(&self, world: &mut dyn WorldOps, obj: ObjectHandle) {
                world.submit_draw(DrawCommand {
                    obj,
                    asset: AssetId(7),
                    kind: AssetKind::Particle,
                    transform: Affine2::IDENTITY,
                    blend: BlendMode::AddAdd,
                    color: ColorRgba::WHITE,
                    frame: 3,
                });
            }
        }

        let mut world = World::new(test_config(1)).unwrap();
        let cat = world.register_category(Arc::new(Beacon));
        let h = world.create(cat).unwrap();
        let frame = world.render();
        assert_eq!(frame.draws.len(), 1);
        assert_eq!(frame.draws[0].obj, h);
        assert_eq!(frame.draws[0].blend, BlendMode::AddAdd);
        assert_eq!(world.metrics().dropped_draws, 0);
    }

    #[test]
    fn after_frame_advances_timers_and_retires_marked() {
        let (mut world, cat, log) = recording_world(1);
        let keep = world.create(cat).unwrap();
        let drop = world.create(cat).unwrap();
        world.delete(drop).unwrap();
        log.take();

        world.after_frame();
        // Retirement is silent; the delete hook already fired.
        assert!(log.is_empty());
        assert_eq!(world.live_count(), 1);
        assert_eq!(world.get(keep, Attr::Timer).unwrap(), Value::Int(1));
        assert_eq!(
            world.get(drop, Attr::Timer).unwrap_err(),
            barrage_core::AccessError::Object(ObjectError::Stale { handle: drop })
        );
        assert_eq!(world.metrics().retired, 1);

        // The slot is recycled under a fresh uid; the old handle stays
        // stale.
        let next = world.create(cat).unwrap();
        assert_eq!(next.slot, drop.slot);
        assert_ne!(next.uid, drop.uid);
        assert!(!world.is_valid(drop));
    }

    #[test]
    fn timers_wrap_instead_of_overflowing() {
        let (mut world, cat, _log) = recording_world(1);
        let h = world.create(cat).unwrap();
        world.set(h, Attr::Timer, Value::Int(i32::MAX)).unwrap();
        world.after_frame();
        assert_eq!(world.get(h, Attr::Timer).unwrap(), Value::Int(i32::MIN));
    }

    #[test]
    fn retirement_releases_the_asset_reference() {
        let assets = CountingAssets::new();
        assets.register(AssetId(1), AssetKind::Sprite);
        let mut world = World::new(WorldConfig {
            capacity: 8,
            assets: Some(Box::new(assets.clone())),
            ..WorldConfig::default()
        })
        .unwrap();
        let cat = world.register_category(Arc::new(InertCategory::new("inert")));
        let h = world.create(cat).unwrap();
        world
            .set(h, Attr::Asset, Value::Asset(Some(AssetId(1))))
            .unwrap();
        assert_eq!(assets.refs(AssetId(1)), 1);
        world.delete(h).unwrap();
        world.after_frame();
        assert_eq!(assets.refs(AssetId(1)), 0);
    }

    #[test]
    fn midpoint_hint_tracks_the_population() {
        let (mut world, cat, _log) = recording_world(1);
        let mut handles = Vec::new();
        for _ in 0..40 {
            handles.push(world.create(cat).unwrap());
        }
        world.after_frame();
        let mid = world.render_mid.unwrap();
        assert!(world.render_list.is_linked(mid));

        // Retiring the midpoint object leaves the hint on a live slot.
        let mid_handle = world.pool.handle(mid);
        world.delete(mid_handle).unwrap();
        world.after_frame();
        assert_eq!(world.live_count(), 39);
        let moved = world.render_mid.unwrap();
        assert!(world.render_list.is_linked(moved));

        // Falling to the threshold clears the hint.
        world.delete_many(&handles[..20]);
        world.after_frame();
        assert!(world.render_mid.is_none());
    }

    #[test]
    fn frame_resets_the_metrics_window() {
        let (mut world, cat, _log) = recording_world(1);
        let h = world.create(cat).unwrap();
        world.delete(h).unwrap();
        world.frame();
        world.bound_check();
        world.render();
        world.after_frame();
        assert_eq!(world.metrics().tick, 1);
        assert_eq!(world.metrics().retired, 1);
        assert_eq!(world.metrics().spawned, 1);

        world.frame();
        // Per-window counters clear; cumulative ones persist.
        assert_eq!(world.metrics().retired, 0);
        assert_eq!(world.metrics().frame_hooks, 0);
        assert_eq!(world.metrics().spawned, 1);
        assert_eq!(world.metrics().tick, 1);
    }
}
