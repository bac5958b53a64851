//! Intrusive doubly-linked chains over arena slot indices.
//!
//! A [`ChainSet`] holds `prev`/`next` index arrays whose first
//! `capacity` entries belong to object slots and whose tail entries are
//! reserved sentinel pairs, one head and one tail per chain. Sentinels
//! are structural: an index at or past `capacity` is a chain bound, so
//! walks terminate on an index comparison and never need a null check
//! or an extremal key.
//!
//! Ordering is maintained by local bubble correction
//! ([`ChainSet::resort_by`]): after one slot's key changes, compare it
//! against its successor and walk forward to the correct position, else
//! against its predecessor and walk backward. Exactly one slot is ever
//! out of place between calls, so the local correction restores the
//! full sort.
//!
//! The runtime uses three instances: one single-chain set ordered by
//! uid (the global list), one single-chain set ordered by (layer, uid)
//! (the render list), and one multi-chain set with a chain per
//! collision group plus the ungrouped chain, each ordered by uid.

use std::fmt;

use barrage_core::SlotId;

/// Marks a slot as linked into no chain.
const NIL: u32 = u32::MAX;

/// A family of intrusive chains sharing one pair of link arrays.
///
/// Every slot is a member of at most one chain in the set at a time.
/// Insert and remove are O(1) splices; resort walks are bounded by
/// chain length and report their step count so callers can meter churn.
#[derive(Clone)]
pub struct ChainSet {
    capacity: u32,
    chains: usize,
    prev: Vec<u32>,
    next: Vec<u32>,
}

impl ChainSet {
    /// A set of `chains` empty chains over `capacity` slots.
    pub fn new(capacity: usize, chains: usize) -> Self {
        assert!(chains >= 1, "a chain set needs at least one chain");
        let total = capacity + 2 * chains;
        assert!(
            total < NIL as usize,
            "pool capacity plus sentinels must fit a u32 index"
        );
        let mut set = Self {
            capacity: capacity as u32,
            chains,
            prev: vec![NIL; total],
            next: vec![NIL; total],
        };
        for chain in 0..chains {
            let head = set.head(chain);
            let tail = set.tail(chain);
            set.next[head as usize] = tail;
            set.prev[tail as usize] = head;
        }
        set
    }

    /// Number of slots the set covers.
    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }

    /// Number of chains in the set.
    pub fn chain_count(&self) -> usize {
        self.chains
    }

    fn head(&self, chain: usize) -> u32 {
        assert!(chain < self.chains, "chain index out of range");
        self.capacity + 2 * chain as u32
    }

    fn tail(&self, chain: usize) -> u32 {
        self.head(chain) + 1
    }

    fn is_sentinel(&self, index: u32) -> bool {
        index >= self.capacity
    }

    /// Whether the slot is currently linked into some chain of the set.
    pub fn is_linked(&self, slot: SlotId) -> bool {
        self.prev[slot.index()] != NIL
    }

    /// Link a slot immediately before the chain's tail sentinel.
    ///
    /// Appending is the common case (fresh objects carry the maximal
    /// uid); out-of-order keys are fixed by a following
    /// [`resort_by`](Self::resort_by).
    pub fn insert(&mut self, chain: usize, slot: SlotId) {
        assert!(
            !self.is_linked(slot),
            "slot {slot} is already linked into this ordering"
        );
        let i = slot.0;
        let tail = self.tail(chain);
        let last = self.prev[tail as usize];
        self.prev[i as usize] = last;
        self.next[i as usize] = tail;
        self.next[last as usize] = i;
        self.prev[tail as usize] = i;
    }

    /// Splice a slot out of its chain.
    pub fn remove(&mut self, slot: SlotId) {
        assert!(
            self.is_linked(slot),
            "slot {slot} is not linked into this ordering"
        );
        let i = slot.index();
        self.splice_out(i);
        self.prev[i] = NIL;
        self.next[i] = NIL;
    }

    /// First slot of a chain, or `None` when the chain is empty.
    pub fn first(&self, chain: usize) -> Option<SlotId> {
        let n = self.next[self.head(chain) as usize];
        (!self.is_sentinel(n)).then_some(SlotId(n))
    }

    /// The slot after `slot` in its chain, or `None` at the chain's end.
    pub fn next_of(&self, slot: SlotId) -> Option<SlotId> {
        debug_assert!(self.is_linked(slot), "successor of an unlinked slot");
        let n = self.next[slot.index()];
        (!self.is_sentinel(n)).then_some(SlotId(n))
    }

    /// Iterate one chain head to tail.
    pub fn iter(&self, chain: usize) -> ChainIter<'_> {
        ChainIter {
            set: self,
            cursor: self.next[self.head(chain) as usize],
        }
    }

    /// Restore ordering after `slot`'s key changed.
    ///
    /// `before(a, b)` is the strict ordering: true when `a`'s key sorts
    /// ahead of `b`'s. The correction compares the slot against its
    /// successor and, if out of order, walks forward to the first
    /// position that no longer sorts ahead of it; otherwise it compares
    /// against its predecessor and walks backward symmetrically. If
    /// neither neighbor is out of order, nothing moves.
    ///
    /// `mid` is an optional hint slot known to be near the middle of
    /// the chain; when the changed slot sorts past it, the walk starts
    /// there instead of at the neighbor, cutting the average walk
    /// roughly in half. The hint must be a linked slot of the same
    /// chain; a stale hint only costs the shortcut, never correctness,
    /// because it is cross-checked against `before` first.
    ///
    /// Returns the number of positions walked, for churn metering.
    pub fn resort_by<F>(&mut self, slot: SlotId, mid: Option<SlotId>, before: F) -> usize
    where
        F: Fn(SlotId, SlotId) -> bool,
    {
        debug_assert!(self.is_linked(slot), "resort of an unlinked slot");
        let i = slot.0;
        let mut steps = 0usize;

        let succ = self.next[i as usize];
        if !self.is_sentinel(succ) && before(SlotId(succ), slot) {
            // Walk forward: find the first entry that does not sort
            // ahead of the slot, then relink just before it.
            let mut cursor = self.next[succ as usize];
            if let Some(m) = mid {
                if before(m, slot) && !self.is_sentinel(cursor) && before(SlotId(cursor), m) {
                    cursor = self.next[m.index()];
                }
            }
            while !self.is_sentinel(cursor) && before(SlotId(cursor), slot) {
                cursor = self.next[cursor as usize];
                steps += 1;
            }
            self.splice_out(i as usize);
            self.link_before(cursor, i);
        } else {
            let pred = self.prev[i as usize];
            if !self.is_sentinel(pred) && before(slot, SlotId(pred)) {
                // Walk backward symmetrically, relinking just after the
                // first entry the slot no longer sorts ahead of.
                let mut cursor = self.prev[pred as usize];
                if let Some(m) = mid {
                    if before(slot, m) && !self.is_sentinel(cursor) && before(m, SlotId(cursor)) {
                        cursor = self.prev[m.index()];
                    }
                }
                while !self.is_sentinel(cursor) && before(slot, SlotId(cursor)) {
                    cursor = self.prev[cursor as usize];
                    steps += 1;
                }
                self.splice_out(i as usize);
                self.link_after(cursor, i);
            }
        }
        steps
    }

    /// Empty every chain and unlink every slot.
    pub fn reset(&mut self) {
        self.prev.fill(NIL);
        self.next.fill(NIL);
        for chain in 0..self.chains {
            let head = self.head(chain);
            let tail = self.tail(chain);
            self.next[head as usize] = tail;
            self.prev[tail as usize] = head;
        }
    }

    fn splice_out(&mut self, i: usize) {
        let p = self.prev[i];
        let n = self.next[i];
        self.next[p as usize] = n;
        self.prev[n as usize] = p;
    }

    fn link_before(&mut self, at: u32, i: u32) {
        let p = self.prev[at as usize];
        self.prev[i as usize] = p;
        self.next[i as usize] = at;
        self.next[p as usize] = i;
        self.prev[at as usize] = i;
    }

    fn link_after(&mut self, at: u32, i: u32) {
        let n = self.next[at as usize];
        self.prev[i as usize] = at;
        self.next[i as usize] = n;
        self.next[at as usize] = i;
        self.prev[n as usize] = i;
    }
}

impl fmt::Debug for ChainSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ChainSet");
        s.field("capacity", &self.capacity);
        for chain in 0..self.chains {
            s.field(
                &format!("chain{chain}"),
                &self.iter(chain).map(|slot| slot.0).collect::<Vec<_>>(),
            );
        }
        s.finish()
    }
}

/// Head-to-tail iterator over one chain.
pub struct ChainIter<'a> {
    set: &'a ChainSet,
    cursor: u32,
}

impl Iterator for ChainIter<'_> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.set.is_sentinel(self.cursor) {
            return None;
        }
        let slot = SlotId(self.cursor);
        self.cursor = self.set.next[self.cursor as usize];
        Some(slot)
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(set: &ChainSet, chain: usize) -> Vec<u32> {
        set.iter(chain).map(|s| s.0).collect()
    }

    /// Walk a chain backward via the prev links, for doubly-linked
    /// consistency checks.
    fn collect_rev(set: &ChainSet, chain: usize) -> Vec<u32> {
        let mut out = Vec::new();
        let mut cursor = set.prev[set.tail(chain) as usize];
        while !set.is_sentinel(cursor) {
            out.push(cursor);
            cursor = set.prev[cursor as usize];
        }
        out.reverse();
        out
    }

    #[test]
    fn insert_appends_in_order() {
        let mut set = ChainSet::new(8, 1);
        for i in [3, 0, 5] {
            set.insert(0, SlotId(i));
        }
        assert_eq!(collect(&set, 0), vec![3, 0, 5]);
        assert_eq!(collect_rev(&set, 0), vec![3, 0, 5]);
    }

    #[test]
    fn remove_splices_middle_and_ends() {
        let mut set = ChainSet::new(8, 1);
        for i in 0..4 {
            set.insert(0, SlotId(i));
        }
        set.remove(SlotId(1));
        assert_eq!(collect(&set, 0), vec![0, 2, 3]);
        set.remove(SlotId(0));
        set.remove(SlotId(3));
        assert_eq!(collect(&set, 0), vec![2]);
        assert_eq!(collect_rev(&set, 0), vec![2]);
        assert!(!set.is_linked(SlotId(1)));
        assert!(set.is_linked(SlotId(2)));
    }

    #[test]
    fn chains_are_independent() {
        let mut set = ChainSet::new(8, 3);
        set.insert(0, SlotId(0));
        set.insert(2, SlotId(1));
        set.insert(2, SlotId(4));
        assert_eq!(collect(&set, 0), vec![0]);
        assert_eq!(collect(&set, 1), Vec::<u32>::new());
        assert_eq!(collect(&set, 2), vec![1, 4]);
        assert_eq!(set.first(1), None);
        assert_eq!(set.first(2), Some(SlotId(1)));
        assert_eq!(set.next_of(SlotId(1)), Some(SlotId(4)));
        assert_eq!(set.next_of(SlotId(4)), None);
    }

    #[test]
    fn resort_bubbles_backward_on_insert() {
        // Keys by slot index; append out of order, then resort the new
        // slot the way allocation does.
        let keys = [5.0, 1.0, 3.0];
        let before =
            |a: SlotId, b: SlotId| keys[a.index()] < keys[b.index()] || (keys[a.index()] == keys[b.index()] && a.0 < b.0);
        let mut set = ChainSet::new(8, 1);
        for i in 0..3 {
            set.insert(0, SlotId(i));
            set.resort_by(SlotId(i), None, before);
        }
        assert_eq!(collect(&set, 0), vec![1, 2, 0]);
        assert_eq!(collect_rev(&set, 0), vec![1, 2, 0]);
    }

    #[test]
    fn resort_walks_forward_on_key_increase() {
        let mut keys = [1.0, 2.0, 3.0, 4.0];
        let mut set = ChainSet::new(8, 1);
        for i in 0..4 {
            set.insert(0, SlotId(i));
        }
        keys[0] = 3.5;
        let steps = set.resort_by(SlotId(0), None, |a, b| keys[a.index()] < keys[b.index()]);
        assert_eq!(collect(&set, 0), vec![1, 2, 0, 3]);
        assert_eq!(steps, 1);
    }

    #[test]
    fn resort_in_place_is_a_no_op() {
        let keys = [1.0, 2.0, 3.0];
        let mut set = ChainSet::new(8, 1);
        for i in 0..3 {
            set.insert(0, SlotId(i));
        }
        let steps = set.resort_by(SlotId(1), None, |a, b| keys[a.index()] < keys[b.index()]);
        assert_eq!(collect(&set, 0), vec![0, 1, 2]);
        assert_eq!(steps, 0);
    }

    #[test]
    fn resort_single_slot_chain_is_a_no_op() {
        let mut set = ChainSet::new(4, 1);
        set.insert(0, SlotId(2));
        set.resort_by(SlotId(2), None, |_, _| false);
        assert_eq!(collect(&set, 0), vec![2]);
    }

    #[test]
    fn midpoint_hint_does_not_change_the_result() {
        // 16 slots keyed by index; move slot 0 near the end, resorting
        // once with the structural middle as hint and once without.
        let mut keys: Vec<f64> = (0..16).map(|i| i as f64).collect();
        keys[0] = 12.5;

        let build = || {
            let mut set = ChainSet::new(16, 1);
            for i in 0..16 {
                set.insert(0, SlotId(i));
            }
            set
        };
        let before = |a: SlotId, b: SlotId| keys[a.index()] < keys[b.index()];

        let mut plain = build();
        let plain_steps = plain.resort_by(SlotId(0), None, before);

        let mut hinted = build();
        let hinted_steps = hinted.resort_by(SlotId(0), Some(SlotId(8)), before);

        assert_eq!(collect(&plain, 0), collect(&hinted, 0));
        assert!(hinted_steps < plain_steps);
    }

    #[test]
    fn hint_past_the_target_is_ignored() {
        // The slot's final position is ahead of the hint, so the
        // cross-check rejects the shortcut and the walk stays local.
        let mut keys: Vec<f64> = (0..8).map(|i| i as f64).collect();
        keys[0] = 1.5;
        let mut set = ChainSet::new(8, 1);
        for i in 0..8 {
            set.insert(0, SlotId(i));
        }
        set.resort_by(SlotId(0), Some(SlotId(4)), |a, b| {
            keys[a.index()] < keys[b.index()]
        });
        assert_eq!(collect(&set, 0), vec![1, 0, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn hint_shortcut_applies_backward_too() {
        let mut keys: Vec<f64> = (0..8).map(|i| i as f64).collect();
        keys[7] = -1.0;
        let mut set = ChainSet::new(8, 1);
        for i in 0..8 {
            set.insert(0, SlotId(i));
        }
        set.resort_by(SlotId(7), Some(SlotId(4)), |a, b| {
            keys[a.index()] < keys[b.index()]
        });
        assert_eq!(collect(&set, 0), vec![7, 0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(collect_rev(&set, 0), vec![7, 0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    #[should_panic(expected = "already linked")]
    fn double_insert_panics() {
        let mut set = ChainSet::new(4, 2);
        set.insert(0, SlotId(1));
        set.insert(1, SlotId(1));
    }

    #[test]
    #[should_panic(expected = "not linked")]
    fn remove_of_unlinked_slot_panics() {
        let mut set = ChainSet::new(4, 1);
        set.remove(SlotId(0));
    }

    #[test]
    fn reset_empties_every_chain() {
        let mut set = ChainSet::new(4, 2);
        set.insert(0, SlotId(0));
        set.insert(1, SlotId(3));
        set.reset();
        assert_eq!(set.first(0), None);
        assert_eq!(set.first(1), None);
        assert!(!set.is_linked(SlotId(0)));
        set.insert(0, SlotId(3));
        assert_eq!(collect(&set, 0), vec![3]);
    }

    // ── Property tests ──────────────────────────────────────────────

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn is_sorted(set: &ChainSet, keys: &[f64]) -> bool {
            let order = collect(set, 0);
            order.windows(2).all(|w| {
                let (a, b) = (w[0] as usize, w[1] as usize);
                keys[a] < keys[b] || (keys[a] == keys[b] && a < b)
            })
        }

        proptest! {
            /// After any sequence of single-key perturbations, each
            /// followed by a resort, the chain is fully sorted and the
            /// prev/next directions agree.
            #[test]
            fn perturb_and_resort_keeps_the_chain_sorted(
                perturbations in proptest::collection::vec((0usize..12, -8i32..8), 1..40),
            ) {
                let mut keys: Vec<f64> = (0..12).map(|i| i as f64).collect();
                let mut set = ChainSet::new(12, 1);
                for i in 0..12 {
                    set.insert(0, SlotId(i));
                }

                for (slot, delta) in perturbations {
                    keys[slot] = f64::from(delta);
                    set.resort_by(SlotId(slot as u32), None, |a, b| {
                        keys[a.index()] < keys[b.index()]
                            || (keys[a.index()] == keys[b.index()] && a.0 < b.0)
                    });
                    prop_assert!(is_sorted(&set, &keys));
                    prop_assert_eq!(collect(&set, 0), collect_rev(&set, 0));
                }
            }

            /// Many equal keys: the resort still terminates and leaves a
            /// stable uid-tiebroken order.
            #[test]
            fn equal_keys_fall_back_to_slot_order(
                moved in 0usize..10,
            ) {
                let keys = [1.0f64; 10];
                let mut set = ChainSet::new(10, 1);
                for i in 0..10 {
                    set.insert(0, SlotId(i));
                }
                set.resort_by(SlotId(moved as u32), None, |a, b| {
                    keys[a.index()] < keys[b.index()]
                        || (keys[a.index()] == keys[b.index()] && a.0 < b.0)
                });
                prop_assert_eq!(collect(&set, 0), (0..10).collect::<Vec<_>>());
            }
        }
    }
}
