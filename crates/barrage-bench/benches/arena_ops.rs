//! Criterion micro-benchmarks for the pool, the attribute rows, and
//! the intrusive orderings.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use barrage_arena::{AttrStore, ChainSet, ObjectPool};
use barrage_core::SlotId;

const POOL_SIZE: usize = 4096;

/// Benchmark: drain the free list and refill it, slot by slot.
fn bench_pool_cycle(c: &mut Criterion) {
    let mut pool = ObjectPool::new(POOL_SIZE);
    let mut slots = Vec::with_capacity(POOL_SIZE);

    c.bench_function("pool_alloc_release_4096", |b| {
        b.iter(|| {
            for _ in 0..POOL_SIZE {
                slots.push(pool.alloc().unwrap());
            }
            for slot in slots.drain(..).rev() {
                pool.release(slot);
            }
            black_box(pool.live_count());
        });
    });
}

/// Benchmark: one motion integration sweep over every attribute row.
fn bench_integrate_rows(c: &mut Criterion) {
    let mut store = AttrStore::new(POOL_SIZE);
    for i in 0..POOL_SIZE {
        store.x[i] = i as f64;
        store.vx[i] = 0.5;
        store.vy[i] = -0.25;
        store.ay[i] = 0.01;
        store.omega[i] = 0.002;
    }

    c.bench_function("integrate_4096_rows", |b| {
        b.iter(|| {
            let ranges = [0..POOL_SIZE];
            for mut chunk in store.chunks_mut(&ranges) {
                chunk.integrate();
            }
            black_box(store.x[0]);
        });
    });
}

/// Benchmark: local bubbling after single-key rewrites in a sorted
/// chain.
///
/// The chain starts sorted by an eight-valued key; every iteration
/// bumps one slot's key and re-sorts it back into place, the same
/// access pattern a layer write produces in the paint ordering.
fn bench_resort_bubble(c: &mut Criterion) {
    let mut links = ChainSet::new(POOL_SIZE, 1);
    let mut keys = vec![0u64; POOL_SIZE];
    for i in 0..POOL_SIZE {
        keys[i] = (i * 8 / POOL_SIZE) as u64;
        links.insert(0, SlotId(i as u32));
    }

    let mut turn = 0usize;
    c.bench_function("resort_single_key_4096", |b| {
        b.iter(|| {
            let i = (turn * 97) % POOL_SIZE;
            turn += 1;
            keys[i] = (keys[i] + 3) % 8;

            let slot = SlotId(i as u32);
            let keys = &keys;
            let steps = links.resort_by(slot, None, |a, b| {
                (keys[a.index()], a.0) < (keys[b.index()], b.0)
            });
            black_box(steps);
        });
    });
}

criterion_group!(
    benches,
    bench_pool_cycle,
    bench_integrate_rows,
    bench_resort_bubble
);
criterion_main!(benches);
