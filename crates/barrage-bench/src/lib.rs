//! Benchmark profiles and utilities for the Barrage object runtime.
//!
//! Provides pre-built [`WorldConfig`] profiles for benchmarks and
//! examples, plus deterministic battlefield seeding:
//!
//! - [`reference_profile`]: 4096-slot pool, 16 collision groups
//! - [`stress_profile`]: 32768-slot pool with the same shape
//! - [`scatter`]: seeded placements inside a cull rectangle
//! - [`populate`]: spawn and place a scattered force in one call

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use barrage_core::{AccessError, Attr, CategoryId, CollisionGroup, ObjectHandle, Value};
use barrage_engine::{Bounds, World, WorldConfig};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Build the reference benchmark profile: a 4096-slot pool with 16
/// collision groups and auto-detected workers.
///
/// 4096 live objects is the upper end of a busy bullet field; the
/// group count matches the default world shape.
pub fn reference_profile() -> WorldConfig {
    WorldConfig {
        capacity: 4096,
        collision_groups: 16,
        ..WorldConfig::default()
    }
}

/// Build a stress benchmark profile: 32768 slots, same shape as
/// [`reference_profile`].
pub fn stress_profile() -> WorldConfig {
    WorldConfig {
        capacity: 32_768,
        ..reference_profile()
    }
}

/// One scattered object: position, velocity, paint layer, and group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub layer: f64,
    pub group: u16,
}

/// Generate deterministic placements for `n` objects.
///
/// Positions are spread uniformly inside `bounds` with a 5% margin per
/// axis so nothing starts on the cull edge; velocities are small random
/// drifts, layers cycle through five values, and groups round-robin
/// through `0..groups`. The same seed always produces the same field.
pub fn scatter(n: usize, groups: u16, seed: u64, bounds: Bounds) -> Vec<Placement> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mx = (bounds.right - bounds.left) * 0.05;
    let my = (bounds.top - bounds.bottom) * 0.05;

    (0..n)
        .map(|k| Placement {
            x: rng.random_range(bounds.left + mx..bounds.right - mx),
            y: rng.random_range(bounds.bottom + my..bounds.top - my),
            vx: rng.random_range(-2.0..2.0),
            vy: rng.random_range(-2.0..2.0),
            layer: (k % 5) as f64,
            group: (k as u16) % groups.max(1),
        })
        .collect()
}

/// Spawn `n` objects of `category` scattered by `seed`.
///
/// Every object gets a radius-2 circle collider so dense placements
/// produce real contact work. Returns the handles in creation order.
pub fn populate(
    world: &mut World,
    category: CategoryId,
    n: usize,
    groups: u16,
    seed: u64,
) -> Result<Vec<ObjectHandle>, AccessError> {
    let placements = scatter(n, groups, seed, world.bounds());
    let mut handles = Vec::with_capacity(n);
    for p in placements {
        let h = world.create(category)?;
        world.set(h, Attr::X, Value::Num(p.x))?;
        world.set(h, Attr::Y, Value::Num(p.y))?;
        world.set(h, Attr::Vx, Value::Num(p.vx))?;
        world.set(h, Attr::Vy, Value::Num(p.vy))?;
        world.set(h, Attr::Layer, Value::Num(p.layer))?;
        world.set(h, Attr::A, Value::Num(2.0))?;
        world.set(h, Attr::Group, Value::Group(CollisionGroup::Group(p.group)))?;
        handles.push(h);
    }
    Ok(handles)
}
