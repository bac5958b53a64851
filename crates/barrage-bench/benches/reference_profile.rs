//! Criterion benchmarks for the full tick pipeline at the reference
//! profiles.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use barrage_bench::{populate, reference_profile, stress_profile};
use barrage_core::{AssetId, AssetKind, Attr, Value};
use barrage_engine::{World, WorldConfig};
use barrage_test_utils::{CountingAssets, InertCategory};

/// Build a populated world whose objects hold still, so repeated ticks
/// see a stable live set.
fn static_world(config: WorldConfig, n: usize) -> World {
    let assets = CountingAssets::new();
    assets.register(AssetId(1), AssetKind::Sprite);

    let mut world = World::new(WorldConfig {
        assets: Some(Box::new(assets)),
        ..config
    })
    .unwrap();
    let shell = world.register_category(Arc::new(InertCategory::new("shell")));
    let handles = populate(&mut world, shell, n, 2, 42).unwrap();
    for h in handles {
        world.set(h, Attr::Vx, Value::Num(0.0)).unwrap();
        world.set(h, Attr::Vy, Value::Num(0.0)).unwrap();
        world
            .set(h, Attr::Asset, Value::Asset(Some(AssetId(1))))
            .unwrap();
    }
    world
}

/// One full tick: every pipeline stage in host order.
fn full_tick(world: &mut World) {
    world.frame();
    world.bound_check();
    world.collide_groups(0, 1).unwrap();
    let frame = world.render();
    black_box(frame.draws.len());
    world.after_frame();
}

fn bench_tick_4096(c: &mut Criterion) {
    let mut world = static_world(reference_profile(), 4096);

    // Warm up: one tick so scratch buffers reach their working size.
    full_tick(&mut world);

    c.bench_function("tick_4096", |b| b.iter(|| full_tick(&mut world)));
}

fn bench_tick_32768(c: &mut Criterion) {
    let mut world = static_world(stress_profile(), 32_768);

    full_tick(&mut world);

    c.bench_function("tick_32768", |b| b.iter(|| full_tick(&mut world)));
}

fn bench_100_ticks_4096(c: &mut Criterion) {
    c.bench_function("100_ticks_4096", |b| {
        b.iter(|| {
            let mut world = World::new(reference_profile()).unwrap();
            let shell = world.register_category(Arc::new(InertCategory::new("shell")));
            populate(&mut world, shell, 4096, 8, 42).unwrap();
            for _ in 0..100 {
                full_tick(&mut world);
            }
            black_box(world.live_count());
        });
    });
}

criterion_group!(
    benches,
    bench_tick_4096,
    bench_tick_32768,
    bench_100_ticks_4096
);
criterion_main!(benches);
