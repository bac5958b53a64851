//! Deterministic pairwise contact matching.
//!
//! Candidate members arrive already collected in chain order with the
//! participation flag applied, so the matchers see only opted-in
//! slots. The cross-group matcher flattens the `|lhs| × |rhs|`
//! candidate grid into a single index space and partitions it across
//! workers; each worker appends hits to its own buffer in ascending
//! pair index, and the partition-ordered buffers concatenate to the
//! exact order a single-threaded scan would produce, independent of
//! worker count.

use barrage_arena::{AttrStore, ObjectPool};
use barrage_core::{overlap, Pose, SlotId};

use crate::workers::{partition_ranges, run_partitions};

/// Whether the colliders of two occupied slots overlap.
pub(crate) fn slots_overlap(pool: &ObjectPool, store: &AttrStore, a: SlotId, b: SlotId) -> bool {
    let (i, j) = (a.index(), b.index());
    overlap(
        pool.collider[i],
        Pose::new(store.x[i], store.y[i], store.rot[i]),
        pool.collider[j],
        Pose::new(store.x[j], store.y[j], store.rot[j]),
    )
}

/// Match every lhs member against every rhs member.
///
/// Pair `p` of the flattened grid is
/// `(lhs[p / rhs.len()], rhs[p % rhs.len()])`. Returns one hit buffer
/// per partition; concatenated in order, the buffers list hits by
/// ascending pair index.
pub(crate) fn match_cross(
    pool: &ObjectPool,
    store: &AttrStore,
    lhs: &[SlotId],
    rhs: &[SlotId],
    workers: usize,
) -> Vec<Vec<(SlotId, SlotId)>> {
    let total = lhs.len() * rhs.len();
    let ranges = partition_ranges(total, workers);
    run_partitions(ranges.into_vec(), |_, range| {
        let mut hits = Vec::new();
        for p in range {
            let a = lhs[p / rhs.len()];
            let b = rhs[p % rhs.len()];
            if slots_overlap(pool, store, a, b) {
                hits.push((a, b));
            }
        }
        hits
    })
}

/// Match unordered member pairs within one group.
///
/// Each pair appears once, earlier chain position first.
pub(crate) fn match_within(
    pool: &ObjectPool,
    store: &AttrStore,
    members: &[SlotId],
) -> Vec<(SlotId, SlotId)> {
    let mut hits = Vec::new();
    for (k, &a) in members.iter().enumerate() {
        for &b in &members[k + 1..] {
            if slots_overlap(pool, store, a, b) {
                hits.push((a, b));
            }
        }
    }
    hits
}

/// Match one subject against each member, skipping the subject itself.
pub(crate) fn match_one(
    pool: &ObjectPool,
    store: &AttrStore,
    subject: SlotId,
    members: &[SlotId],
) -> Vec<(SlotId, SlotId)> {
    let mut hits = Vec::new();
    for &b in members {
        if b != subject && slots_overlap(pool, store, subject, b) {
            hits.push((subject, b));
        }
    }
    hits
}

// ── Tests ───────────────────────────────────────────────────────────
