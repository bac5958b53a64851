//! Strongly-typed identifiers and the [`ObjectHandle`] reference type.

use std::fmt;

/// Dense arena index of one live object's attribute row.
///
/// Slots lie in `[0, capacity)`, stay stable for the object's lifetime,
/// and are recycled through the pool free list after release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u32);

impl SlotId {
    /// The slot as a usize index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SlotId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Permanent object identity and the global ordering key.
///
/// Assigned from a monotonic counter at allocation, starting at 1, and
/// never reused — two distinct objects always have different uids even
/// when one recycles the other's slot, so a stored uid can detect slot
/// reuse without a separate generation counter. Ties are impossible,
/// which makes the uid the tiebreaker for every ordering in the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid(pub u64);

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Uid {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies a registered behavior category.
///
/// Categories are registered on the world and assigned sequential IDs.
/// `CategoryId(n)` corresponds to the n-th registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub u32);

impl CategoryId {
    /// The category as a usize registry index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CategoryId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Collision bucket membership: a bounded group index, or none.
///
/// `None` keeps the object out of every pairwise contact test while
/// remaining a valid chain membership — every live object sits in
/// exactly one collision chain at all times, and the "none" chain is
/// an ordinary chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollisionGroup {
    /// Not participating in any contact test.
    #[default]
    None,
    /// Member of the numbered group; valid range is set by world config.
    Group(u16),
}

impl CollisionGroup {
    /// The group index, or `None` for the ungrouped bucket.
    pub fn index(self) -> Option<u16> {
        match self {
            Self::None => None,
            Self::Group(g) => Some(g),
        }
    }
}

impl fmt::Display for CollisionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Group(g) => write!(f, "{g}"),
        }
    }
}

impl From<u16> for CollisionGroup {
    fn from(g: u16) -> Self {
        Self::Group(g)
    }
}

/// External reference to a pooled object.
///
/// Pairs the slot with the uid observed at creation. Every API entry
/// point revalidates the pair before touching the slot: a handle whose
/// uid no longer matches the slot's current occupant is stale and is
/// reported as [`ObjectError::Stale`](crate::error::ObjectError), never
/// dereferenced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    /// Attribute row of the referenced object.
    pub slot: SlotId,
    /// Uid the slot held when this handle was issued.
    pub uid: Uid,
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.uid, self.slot)
    }
}

// ── Tests ───────────────────────────────────────────────────────────
