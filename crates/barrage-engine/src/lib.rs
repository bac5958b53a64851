//! Tick pipeline and world orchestration for the Barrage object runtime.
//!
//! [`World`] owns the object pool, the attribute store, and the three
//! intrusive orderings, and drives the per-tick pipeline:
//!
//! 1. [`World::frame`] — behavior hooks in creation order, then the
//!    parallel integration sweep over the occupied slot range.
//! 2. [`World::bound_check`] — parallel out-of-bounds cull, marks
//!    replayed in slot order.
//! 3. [`World::collide_groups`] / [`World::collide_object_group`] —
//!    pairwise contact matching, invoked per group pair by the
//!    embedding script.
//! 4. [`World::render`] — visible scan, parallel transform refresh,
//!    and the ordered draw walk.
//! 5. [`World::after_frame`] — timers and retirement, the only point
//!    where slots are freed.
//!
//! All hook and event delivery happens on the control thread. The
//! parallel stages fan out over read-only state or disjoint row chunks
//! and collect their results in partition order, so the observable
//! event sequence is identical for every worker count.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod render;
pub mod world;

mod matcher;
mod tick;
mod workers;

// Public re-exports for the primary API surface.
pub use config::{Bounds, ConfigError, WorldConfig, MAX_WORKERS};
pub use metrics::FrameMetrics;
pub use render::RenderFrame;
pub use world::{Scope, World};
