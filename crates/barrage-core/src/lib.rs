//! Core types and traits for the Barrage object runtime.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Barrage workspace:
//! identifiers and handles, the object status machine, the [`Category`]
//! behavior trait with its hook tags, collider geometry, the attribute
//! surface, render command types, the asset reference-count seam, and
//! the error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod assets;
pub mod attr;
pub mod category;
pub mod collider;
pub mod error;
pub mod id;
pub mod render;
pub mod status;

// Public re-exports for the primary API surface.
pub use assets::{AssetCatalog, AssetId, AssetKind, AssetStore};
pub use attr::{Attr, Value};
pub use category::{Category, HookKind, WorldOps};
pub use collider::{overlap, Collider, ColliderShape, Pose};
pub use error::{AccessError, AssetError, ObjectError, PoolError, PropertyError};
pub use id::{CategoryId, CollisionGroup, ObjectHandle, SlotId, Uid};
pub use render::{Affine2, BlendMode, ColorRgba, DrawCommand, LightCommand};
pub use status::ObjectStatus;
