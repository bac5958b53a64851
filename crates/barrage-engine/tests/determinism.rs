//! Integration test: determinism across worker budgets.
//!
//! The same scripted battlefield must produce identical observable
//! output at every worker count: hook invocation order, draw and light
//! output, and the per-window counters. Parallel stages collect into
//! per-partition buffers that the control thread replays in partition
//! order, so thread scheduling must never leak into anything a behavior
//! hook or the renderer can see.
//!
//! Workload: a 6x4 lattice of recording unit circles split between two
//! collision groups, asset-backed draws, a few light sources, a
//! cross-group and a same-group contact pass per tick, and one
//! host-driven removal per tick so retirement churn is in the mix.
//! Five ticks at 1, 2, and 8 workers.

use std::num::NonZeroUsize;
use std::sync::Arc;

use barrage_core::{
    AssetId, AssetKind, Attr, CollisionGroup, DrawCommand, HookKind, LightCommand, ObjectHandle,
    Value,
};
use barrage_engine::{World, WorldConfig};
use barrage_test_utils::{CountingAssets, EventLog, HookEvent, RecordingCategory};

const TICKS: usize = 5;
const COLS: usize = 6;
const ROWS: usize = 4;

/// Everything one run makes observable.
struct RunOutput {
    events: Vec<HookEvent>,
    draws: Vec<Vec<DrawCommand>>,
    lights: Vec<Vec<LightCommand>>,
    counters: String,
}

/// Build the battlefield lattice. Spacing 1.5 against radius 1.0 keeps
/// neighbours overlapping, so both contact passes produce real work.
fn build_world(workers: usize) -> (World, EventLog, Vec<ObjectHandle>) {
    let log = EventLog::new();
    let assets = CountingAssets::new();
    assets.register(AssetId(7), AssetKind::Sprite);

    let mut world = World::new(WorldConfig {
        capacity: 64,
        collision_groups: 4,
        workers: NonZeroUsize::new(workers),
        assets: Some(Box::new(assets)),
        ..WorldConfig::default()
    })
    .unwrap();

    let mut shell = RecordingCategory::new("shell", log.clone());
    shell.frame = HookKind::Scripted;
    shell.collide = HookKind::Scripted;
    let shell = world.register_category(Arc::new(shell));

    let mut handles = Vec::new();
    for row in 0..ROWS {
        for col in 0..COLS {
            let k = row * COLS + col;
            let h = world.create(shell).unwrap();
            world.set(h, Attr::X, Value::Num(col as f64 * 1.5)).unwrap();
            world.set(h, Attr::Y, Value::Num(row as f64 * 1.5)).unwrap();
            world.set(h, Attr::A, Value::Num(1.0)).unwrap();
            let vx = if k % 3 == 0 { 0.25 } else { -0.1 };
            world.set(h, Attr::Vx, Value::Num(vx)).unwrap();
            world.set(h, Attr::Layer, Value::Num((k % 5) as f64)).unwrap();
            let group = CollisionGroup::Group((k % 2) as u16);
            world.set(h, Attr::Group, Value::Group(group)).unwrap();
            world
                .set(h, Attr::Asset, Value::Asset(Some(AssetId(7))))
                .unwrap();
            if k % 5 == 0 {
                world.set(h, Attr::Light, Value::Bool(true)).unwrap();
            }
            handles.push(h);
        }
    }
    (world, log, handles)
}

/// Run the full pipeline for [`TICKS`] ticks, capturing every
/// observable along the way.
fn run(workers: usize) -> RunOutput {
    let (mut world, log, handles) = build_world(workers);
    let mut draws = Vec::new();
    let mut lights = Vec::new();

    for tick in 0..TICKS {
        world.frame();
        world.bound_check();
        world.collide_groups(0, 1).unwrap();
        world.collide_groups(1, 1).unwrap();
        // One scripted removal per tick keeps retirement in the mix.
        world.delete(handles[tick]).unwrap();
        let frame = world.render();
        draws.push(frame.draws.clone());
        lights.push(frame.lights.clone());
        world.after_frame();
    }

    RunOutput {
        events: log.take(),
        draws,
        lights,
        counters: format!("{:?}", world.metrics()),
    }
}

#[test]
fn hook_sequences_match_across_worker_counts() {
    let single = run(1);
    let dual = run(2);
    let full = run(8);

    let contact_count = single
        .events
        .iter()
        .filter(|e| matches!(e, HookEvent::Collide(_, _)))
        .count();
    assert!(
        contact_count > 0,
        "workload should produce contact callbacks, got {} events and no contacts",
        single.events.len()
    );

    assert_eq!(single.events, dual.events);
    assert_eq!(single.events, full.events);
}

#[test]
fn render_output_matches_across_worker_counts() {
    let single = run(1);
    let dual = run(2);
    let full = run(8);

    for (tick, frame) in single.draws.iter().enumerate() {
        assert!(
            !frame.is_empty(),
            "tick {tick} should draw the surviving lattice"
        );
    }

    assert_eq!(single.draws, dual.draws);
    assert_eq!(single.draws, full.draws);
    assert_eq!(single.lights, dual.lights);
    assert_eq!(single.lights, full.lights);
}

#[test]
fn final_counters_match_across_worker_counts() {
    let single = run(1);
    let dual = run(2);
    let full = run(8);

    assert_eq!(single.counters, dual.counters);
    assert_eq!(single.counters, full.counters);
}

#[test]
fn repeated_runs_at_one_worker_count_are_reproducible() {
    let first = run(2);
    let second = run(2);

    assert_eq!(first.events, second.events);
    assert_eq!(first.draws, second.draws);
    assert_eq!(first.lights, second.lights);
    assert_eq!(first.counters, second.counters);
}
