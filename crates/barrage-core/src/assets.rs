//! The asset reference-count seam.
//!
//! The resource system owns sprite/animation/particle/font/texture
//! assets; the runtime only holds references. [`AssetStore`] is the
//! narrow interface the world calls when an object binds or drops an
//! asset — acquire on assignment, release on reassignment, retirement,
//! and reset, always from the control thread. [`AssetCatalog`] is the
//! in-crate registry implementation.

use std::fmt;

use indexmap::IndexMap;

use crate::error::AssetError;

/// Identifies a registered asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub u32);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AssetId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Kind of a drawable asset; the default draw path dispatches on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Static image.
    Sprite,
    /// Animated image sequence.
    Animation,
    /// Particle system.
    Particle,
    /// Text / glyph set.
    Font,
    /// Raw texture.
    Texture,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sprite => write!(f, "sprite"),
            Self::Animation => write!(f, "animation"),
            Self::Particle => write!(f, "particle"),
            Self::Font => write!(f, "font"),
            Self::Texture => write!(f, "texture"),
        }
    }
}

/// Reference-counted asset access.
///
/// `acquire` bumps the reference count and reports the asset kind so
/// the world can cache it for draw dispatch; `release` drops one
/// reference. Implementations decide what a zero count means (the
/// catalog just records it; a real resource system would unload).
pub trait AssetStore {
    /// The kind of an asset, without touching its reference count.
    fn kind(&self, id: AssetId) -> Option<AssetKind>;

    /// Take one reference; fails if the id is unknown.
    fn acquire(&mut self, id: AssetId) -> Result<AssetKind, AssetError>;

    /// Drop one reference.
    fn release(&mut self, id: AssetId);
}

#[derive(Clone, Debug)]
struct CatalogEntry {
    kind: AssetKind,
    refs: u32,
}

/// In-memory asset registry with reference counts.
///
/// Insertion-ordered so iteration and debugging output are stable.
#[derive(Clone, Debug, Default)]
pub struct AssetCatalog {
    entries: IndexMap<AssetId, CatalogEntry>,
    next_id: u32,
}

impl AssetCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset of `kind`, returning its fresh id.
    pub fn register(&mut self, kind: AssetKind) -> AssetId {
        let id = AssetId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, CatalogEntry { kind, refs: 0 });
        id
    }

    /// Current reference count of an asset, or 0 for unknown ids.
    pub fn refs(&self, id: AssetId) -> u32 {
        self.entries.get(&id).map_or(0, |e| e.refs)
    }

    /// Number of registered assets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no assets.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetStore for AssetCatalog {
    fn kind(&self, id: AssetId) -> Option<AssetKind> {
        self.entries.get(&id).map(|e| e.kind)
    }

    fn acquire(&mut self, id: AssetId) -> Result<AssetKind, AssetError> {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.refs += 1;
                Ok(entry.kind)
            }
            None => Err(AssetError::Unknown { id }),
        }
    }

    fn release(&mut self, id: AssetId) {
        if let Some(entry) = self.entries.get_mut(&id) {
            debug_assert!(entry.refs > 0, "release of unreferenced asset {id}");
            entry.refs = entry.refs.saturating_sub(1);
        }
    }
}
