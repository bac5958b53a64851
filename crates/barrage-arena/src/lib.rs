//! Storage layer for the Barrage object runtime.
//!
//! Three fixed-capacity structures, allocated once at world creation
//! and never resized:
//!
//! ```text
//! ObjectPool   one record row per slot: uid, status, layer, group,
//!              flags, timers, category, collider, asset, blend, color;
//!              free-list allocation, monotonic uid assignment, and the
//!              occupied-range watermark for batch stages.
//! AttrStore    one physical row per slot, struct-of-arrays: position,
//!              velocity, acceleration, rotation, scale, displacement.
//!              Splits into disjoint mutable chunks for parallel
//!              integration.
//! ChainSet     intrusive doubly-linked chains over slot indices with
//!              reserved sentinel bounds; insert / remove / local
//!              bubble-correction resort. One instance per ordering.
//! ```
//!
//! The pool and store are row-aligned: slot `i` names record row `i` and
//! physical row `i`. Rows of free slots stay zeroed so batch numeric
//! stages can sweep the whole occupied range without a liveness test.
//!
//! Nothing in this crate locks or spins. Parallel callers get safety
//! from disjoint `&mut` chunks ([`AttrStore::chunks_mut`]) and shared
//! `&self` reads; all structural mutation is single-threaded by the
//! engine's discipline.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod links;
pub mod pool;
pub mod store;

// Public re-exports for the primary API surface.
pub use links::ChainSet;
pub use pool::ObjectPool;
pub use store::{AttrStore, RowChunk};
