//! Fork-join scatter used by the parallel pipeline stages.
//!
//! Each parallel stage splits its index space into at most
//! [`MAX_WORKERS`] contiguous ranges, runs one task per partition on
//! scoped threads (the calling thread takes partition 0), and collects
//! the per-partition outputs in partition order. Partition order equals
//! ascending index order, so a stage that replays its collected outputs
//! sequentially observes the order a single-threaded sweep would have
//! produced, for any worker count.

use std::ops::Range;

use smallvec::SmallVec;

use crate::config::MAX_WORKERS;

/// Split `[0, len)` into at most `workers` contiguous non-empty ranges
/// of near-equal size, in ascending order.
pub(crate) fn partition_ranges(
    len: usize,
    workers: usize,
) -> SmallVec<[Range<usize>; MAX_WORKERS]> {
    let mut out = SmallVec::new();
    if len == 0 || workers == 0 {
        return out;
    }
    let parts = workers.min(len);
    let base = len / parts;
    let extra = len % parts;
    let mut start = 0;
    for i in 0..parts {
        let size = base + usize::from(i < extra);
        out.push(start..start + size);
        start += size;
    }
    out
}

/// Run one task per work item on scoped threads and collect the
/// outputs in item order.
///
/// The calling thread takes item 0 while spawned workers take the
/// rest; a single item runs inline without spawning. A panicking
/// worker is resumed on the calling thread.
pub(crate) fn run_partitions<I, T, F>(items: Vec<I>, task: F) -> Vec<T>
where
    I: Send,
    T: Send,
    F: Fn(usize, I) -> T + Sync,
{
    let mut items = items.into_iter();
    let Some(first) = items.next() else {
        return Vec::new();
    };
    if items.len() == 0 {
        return vec![task(0, first)];
    }
    std::thread::scope(|scope| {
        let task = &task;
        let handles: Vec<_> = items
            .enumerate()
            .map(|(i, item)| scope.spawn(move || task(i + 1, item)))
            .collect();
        let mut out = Vec::with_capacity(handles.len() + 1);
        out.push(task(0, first));
        for handle in handles {
            match handle.join() {
                Ok(value) => out.push(value),
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
        out
    })
}

// ── Tests ───────────────────────────────────────────────────────────
