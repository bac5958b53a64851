//! Error taxonomy for the Barrage object runtime.
//!
//! Three recoverable classes — pool exhaustion, invalid references, and
//! rejected property writes — surface as `Result` errors and never abort
//! a tick. Internal invariant violations (corrupted sentinel links,
//! double frees, occupied-range drift) are unconditionally fatal and
//! panic instead, because continuing would risk silent corruption across
//! the three intertwined orderings.

use std::error::Error;
use std::fmt;

use crate::attr::Attr;
use crate::id::{CategoryId, ObjectHandle};

/// Allocation failure from the object pool.
///
/// Capacity is fixed at construction and never grows; callers must treat
/// exhaustion as an expected load condition, not a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// Every slot is occupied.
    Exhausted {
        /// The fixed pool capacity.
        capacity: usize,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { capacity } => {
                write!(f, "object pool exhausted ({capacity} slots)")
            }
        }
    }
}

impl Error for PoolError {}

/// Invalid external reference: a stale handle or an out-of-range index.
///
/// The runtime never dereferences a stale handle silently; every API
/// entry point revalidates the slot/uid pair first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectError {
    /// The handle's slot no longer holds the uid it was issued for.
    Stale {
        /// The rejected handle.
        handle: ObjectHandle,
    },
    /// A collision group index at or beyond the configured group count.
    GroupOutOfRange {
        /// The rejected index.
        group: u16,
        /// The configured group count.
        limit: u16,
    },
    /// A category id with no registration behind it.
    UnknownCategory {
        /// The rejected id.
        id: CategoryId,
    },
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stale { handle } => write!(f, "stale object handle {handle}"),
            Self::GroupOutOfRange { group, limit } => {
                write!(f, "collision group {group} out of range (limit {limit})")
            }
            Self::UnknownCategory { id } => write!(f, "unknown category {id}"),
        }
    }
}

impl Error for ObjectError {}

/// Rejected attribute write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyError {
    /// The attribute is derived state and cannot be written.
    ReadOnly {
        /// The attribute that was written.
        attr: Attr,
    },
    /// A collider half extent must be non-negative.
    NegativeExtent {
        /// The attribute that was written.
        attr: Attr,
        /// The rejected value.
        value: f64,
    },
    /// The supplied value's variant does not match the attribute.
    WrongType {
        /// The attribute that was written.
        attr: Attr,
        /// Name of the expected value variant.
        expected: &'static str,
    },
    /// The free status cannot be assigned; slots are freed only by
    /// retirement.
    FreeStatus,
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly { attr } => write!(f, "attribute '{attr}' is read-only"),
            Self::NegativeExtent { attr, value } => {
                write!(f, "attribute '{attr}' rejects negative extent {value}")
            }
            Self::WrongType { attr, expected } => {
                write!(f, "attribute '{attr}' expects a {expected} value")
            }
            Self::FreeStatus => write!(f, "the free status is reserved for retired slots"),
        }
    }
}

impl Error for PropertyError {}

/// Unknown asset identity at acquire time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetError {
    /// No asset registered under the id.
    Unknown {
        /// The rejected id.
        id: crate::assets::AssetId,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown { id } => write!(f, "unknown asset {id}"),
        }
    }
}

impl Error for AssetError {}

/// Combined error for world access operations that can fail in more
/// than one class (`create`, attribute `get`/`set`).
///
/// Wraps exactly one of the recoverable classes; `source()` returns the
/// wrapped error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AccessError {
    /// Allocation failed.
    Pool(PoolError),
    /// The reference was invalid.
    Object(ObjectError),
    /// The property write was rejected.
    Property(PropertyError),
    /// An asset attachment failed to acquire.
    Asset(AssetError),
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool(e) => write!(f, "{e}"),
            Self::Object(e) => write!(f, "{e}"),
            Self::Property(e) => write!(f, "{e}"),
            Self::Asset(e) => write!(f, "{e}"),
        }
    }
}

impl Error for AccessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pool(e) => Some(e),
            Self::Object(e) => Some(e),
            Self::Property(e) => Some(e),
            Self::Asset(e) => Some(e),
        }
    }
}

impl From<PoolError> for AccessError {
    fn from(e: PoolError) -> Self {
        Self::Pool(e)
    }
}

impl From<ObjectError> for AccessError {
    fn from(e: ObjectError) -> Self {
        Self::Object(e)
    }
}

impl From<PropertyError> for AccessError {
    fn from(e: PropertyError) -> Self {
        Self::Property(e)
    }
}

impl From<AssetError> for AccessError {
    fn from(e: AssetError) -> Self {
        Self::Asset(e)
    }
}
