//! Fixed-capacity object pool: record columns, free-list allocation,
//! monotonic uid assignment, and the occupied-range watermark.
//!
//! The pool owns the non-physical half of every object row (identity,
//! status, sort keys, flags, timers, render state); the physical half
//! lives in the row-aligned [`AttrStore`](crate::store::AttrStore).
//! Allocation pops the free-list stack, so recently released slots are
//! reused first and the occupied prefix stays dense; release pushes and
//! shrinks the watermark past any trailing free slots.
//!
//! Staleness detection needs no generation counter: uids are never
//! reused, so a handle is valid exactly when its slot still holds the
//! uid it was issued with.

use barrage_core::{
    AssetId, BlendMode, CategoryId, Collider, CollisionGroup, ColorRgba, ObjectError,
    ObjectHandle, ObjectStatus, PoolError, SlotId, Uid,
};

/// Object record columns plus allocation state.
///
/// Record columns are public and indexed by slot, like the attribute
/// store's physical columns; the allocation state (free list, uid
/// counter, watermark) is private so the alloc/release invariants hold.
#[derive(Clone, Debug)]
pub struct ObjectPool {
    /// Permanent identity; `Uid(0)` on free rows.
    pub uid: Vec<Uid>,
    /// Lifecycle status; `Free` exactly for slots on the free list.
    pub status: Vec<ObjectStatus>,
    /// Paint layer, the render-list major key.
    pub layer: Vec<f64>,
    /// Collision chain membership.
    pub group: Vec<CollisionGroup>,
    /// Skip during render build.
    pub hide: Vec<bool>,
    /// Participates in the bounds cull.
    pub bound: Vec<bool>,
    /// Participates in contact tests.
    pub colli: Vec<bool>,
    /// Emits a light source during render build.
    pub light: Vec<bool>,
    /// Frames since creation, advanced by retirement.
    pub timer: Vec<i32>,
    /// Animation frame counter, advanced by retirement.
    pub ani_timer: Vec<i32>,
    /// Behavior category.
    pub category: Vec<CategoryId>,
    /// Collider shape and half extents.
    pub collider: Vec<Collider>,
    /// Bound asset reference, if any.
    pub asset: Vec<Option<AssetId>>,
    /// Blend mode for the default draw path.
    pub blend: Vec<BlendMode>,
    /// Vertex color for the default draw path.
    pub color: Vec<ColorRgba>,

    free: Vec<u32>,
    next_uid: u64,
    occupied_end: usize,
    live: usize,
}

impl ObjectPool {
    /// A pool of `capacity` free slots. The first allocation returns
    /// slot 0 with uid 1.
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity < u32::MAX as usize,
            "pool capacity must fit a u32 slot index"
        );
        Self {
            uid: vec![Uid(0); capacity],
            status: vec![ObjectStatus::Free; capacity],
            layer: vec![0.0; capacity],
            group: vec![CollisionGroup::None; capacity],
            hide: vec![false; capacity],
            bound: vec![true; capacity],
            colli: vec![true; capacity],
            light: vec![false; capacity],
            timer: vec![0; capacity],
            ani_timer: vec![0; capacity],
            category: vec![CategoryId(0); capacity],
            collider: vec![Collider::default(); capacity],
            asset: vec![None; capacity],
            blend: vec![BlendMode::default(); capacity],
            color: vec![ColorRgba::WHITE; capacity],
            // Reversed so the stack pops slot 0 first.
            free: (0..capacity as u32).rev().collect(),
            next_uid: 1,
            occupied_end: 0,
            live: 0,
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.uid.len()
    }

    /// Number of occupied (non-free) slots.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// One past the highest occupied slot; batch stages sweep
    /// `[0, occupied_end)`.
    pub fn occupied_end(&self) -> usize {
        self.occupied_end
    }

    /// Take a free slot, assign the next uid, and reset the record
    /// columns to creation defaults (active, ungrouped, bound and colli
    /// set, layer 0).
    ///
    /// The caller is responsible for clearing the attribute row, linking
    /// the slot into the orderings, and setting the real category.
    pub fn alloc(&mut self) -> Result<SlotId, PoolError> {
        let Some(index) = self.free.pop() else {
            return Err(PoolError::Exhausted {
                capacity: self.capacity(),
            });
        };
        let i = index as usize;
        assert_eq!(
            self.status[i],
            ObjectStatus::Free,
            "free list handed out an occupied slot"
        );

        self.uid[i] = Uid(self.next_uid);
        self.next_uid += 1;
        self.status[i] = ObjectStatus::Active;
        self.layer[i] = 0.0;
        self.group[i] = CollisionGroup::None;
        self.hide[i] = false;
        self.bound[i] = true;
        self.colli[i] = true;
        self.light[i] = false;
        self.timer[i] = 0;
        self.ani_timer[i] = 0;
        self.category[i] = CategoryId(0);
        self.collider[i] = Collider::default();
        self.asset[i] = None;
        self.blend[i] = BlendMode::default();
        self.color[i] = ColorRgba::WHITE;

        self.live += 1;
        self.occupied_end = self.occupied_end.max(i + 1);
        Ok(SlotId(index))
    }

    /// Return a slot to the free list.
    ///
    /// The caller must already have unlinked the slot from every
    /// ordering and released its asset reference; the pool only recycles
    /// the slot and shrinks the watermark.
    pub fn release(&mut self, slot: SlotId) {
        let i = slot.index();
        assert_ne!(
            self.status[i],
            ObjectStatus::Free,
            "double free of slot {slot}"
        );
        self.status[i] = ObjectStatus::Free;
        self.uid[i] = Uid(0);
        self.asset[i] = None;
        self.live -= 1;
        self.free.push(slot.0);
        while self.occupied_end > 0 && self.status[self.occupied_end - 1] == ObjectStatus::Free {
            self.occupied_end -= 1;
        }
    }

    /// Whether the slot currently holds an object (any non-free status).
    pub fn is_occupied(&self, slot: SlotId) -> bool {
        self.status[slot.index()] != ObjectStatus::Free
    }

    /// The external handle for an occupied slot.
    pub fn handle(&self, slot: SlotId) -> ObjectHandle {
        debug_assert!(self.is_occupied(slot), "handle of a free slot");
        ObjectHandle {
            slot,
            uid: self.uid[slot.index()],
        }
    }

    /// Validate a handle against the slot's current occupant.
    ///
    /// Marked objects still resolve; they stay readable until
    /// retirement. Free slots, out-of-range slots, and uid mismatches
    /// report the handle as stale.
    pub fn resolve(&self, handle: ObjectHandle) -> Result<SlotId, ObjectError> {
        let i = handle.slot.index();
        if i < self.capacity()
            && self.status[i] != ObjectStatus::Free
            && self.uid[i] == handle.uid
        {
            Ok(handle.slot)
        } else {
            Err(ObjectError::Stale { handle })
        }
    }

    /// Free every slot and restart the uid counter at 1.
    ///
    /// Callers unlink and release references first; this is the storage
    /// half of a world reset.
    pub fn reset(&mut self) {
        let capacity = self.capacity();
        self.uid.fill(Uid(0));
        self.status.fill(ObjectStatus::Free);
        self.layer.fill(0.0);
        self.group.fill(CollisionGroup::None);
        self.hide.fill(false);
        self.bound.fill(true);
        self.colli.fill(true);
        self.light.fill(false);
        self.timer.fill(0);
        self.ani_timer.fill(0);
        self.category.fill(CategoryId(0));
        self.collider.fill(Collider::default());
        self.asset.fill(None);
        self.blend.fill(BlendMode::default());
        self.color.fill(ColorRgba::WHITE);
        self.free.clear();
        self.free.extend((0..capacity as u32).rev());
        self.next_uid = 1;
        self.occupied_end = 0;
        self.live = 0;
    }
}

// ── Tests ───────────────────────────────────────────────────────────
