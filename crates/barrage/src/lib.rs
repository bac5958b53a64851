//! Barrage: a pooled object runtime for bullet-storm games and
//! real-time simulations.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Barrage sub-crates. For most users, adding `barrage` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use barrage::prelude::*;
//! use std::sync::Arc;
//!
//! // A bullet that spins as it flies.
//! struct Spinner;
//! impl Category for Spinner {
//!     fn name(&self) -> &str { "spinner" }
//!     fn frame_hook(&self) -> HookKind { HookKind::Scripted }
//!     fn on_frame(&self, world: &mut dyn WorldOps, obj: ObjectHandle) {
//!         world.set(obj, Attr::Omega, Value::Num(0.1)).unwrap();
//!     }
//! }
//!
//! // Build a small world and fire one shot.
//! let mut world = World::new(WorldConfig {
//!     capacity: 1024,
//!     collision_groups: 4,
//!     ..WorldConfig::default()
//! })
//! .unwrap();
//! let spinner = world.register_category(Arc::new(Spinner));
//! let shot = world.create(spinner).unwrap();
//! world.set(shot, Attr::Vx, Value::Num(3.0)).unwrap();
//!
//! // One tick: behavior, cull, contacts, render, retirement.
//! world.frame();
//! world.bound_check();
//! world.collide_groups(0, 1).unwrap();
//! world.render();
//! world.after_frame();
//!
//! assert_eq!(world.get(shot, Attr::X).unwrap(), Value::Num(3.0));
//! assert_eq!(world.metrics().tick, 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `barrage-core` | IDs, attributes, colliders, hook traits, render payloads |
//! | [`arena`] | `barrage-arena` | Slot pool, attribute rows, intrusive chain orderings |
//! | [`engine`] | `barrage-engine` | The world, tick pipeline, configuration, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`barrage-core`).
///
/// Contains [`types::ObjectHandle`], the [`types::Attr`] /
/// [`types::Value`] attribute surface, collider shapes and the overlap
/// test, the [`types::Category`] behavior trait, and the render
/// payloads.
pub use barrage_core as types;

/// Pool, attribute rows, and chain orderings (`barrage-arena`).
///
/// [`arena::ObjectPool`] owns slot identity, [`arena::AttrStore`]
/// holds the hot attribute columns, and [`arena::ChainSet`] maintains
/// the intrusive sorted chains the walks run over.
pub use barrage_arena as arena;

/// The world and its tick pipeline (`barrage-engine`).
///
/// [`engine::World`] is the main entry point; see
/// [`engine::WorldConfig`] for construction and
/// [`engine::FrameMetrics`] for the per-tick counters.
pub use barrage_engine as engine;

/// Common imports for typical Barrage usage.
///
/// ```rust
/// use barrage::prelude::*;
/// ```
///
/// This imports the most frequently used types: the world and its
/// config, object identity, the attribute surface, the behavior trait,
/// and the render payloads.
pub mod prelude {
    // Object identity and attributes
    pub use barrage_core::{Attr, CategoryId, CollisionGroup, ObjectHandle, Value};

    // Behavior hooks
    pub use barrage_core::{Category, HookKind, WorldOps};

    // Collision and render payloads
    pub use barrage_core::{BlendMode, Collider, ColorRgba, DrawCommand, LightCommand};

    // Errors
    pub use barrage_core::{AccessError, AssetError, ObjectError, PoolError, PropertyError};

    // Assets
    pub use barrage_core::{AssetId, AssetKind, AssetStore};

    // World
    pub use barrage_engine::{Bounds, FrameMetrics, RenderFrame, Scope, World, WorldConfig};
}
