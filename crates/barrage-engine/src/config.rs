//! World construction parameters and validation.
//!
//! [`WorldConfig`] collects everything fixed at world creation: pool
//! capacity, the collision group count, the cull rectangle, the
//! fork-join worker budget, and the asset store seam. `validate()`
//! checks the structural invariants before any storage is allocated.

use std::error::Error;
use std::fmt;
use std::num::NonZeroUsize;

use barrage_core::AssetStore;

/// Hard cap on fork-join workers per parallel stage.
pub const MAX_WORKERS: usize = 8;

// ── Bounds ──────────────────────────────────────────────────────────

/// Axis-aligned rectangle for the out-of-bounds cull.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Smallest x still inside.
    pub left: f64,
    /// Largest x still inside.
    pub right: f64,
    /// Smallest y still inside.
    pub bottom: f64,
    /// Largest y still inside.
    pub top: f64,
}

impl Bounds {
    /// A rectangle from its four edges.
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Whether the point lies inside the rectangle. Edges count as
    /// inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.bottom && y <= self.top
    }

    /// Whether the edges enclose a region. NaN edges never do.
    pub fn is_ordered(&self) -> bool {
        self.left < self.right && self.bottom < self.top
    }
}

impl Default for Bounds {
    /// The conventional playfield: x within ±1024, y within ±768.
    fn default() -> Self {
        Self::new(-1024.0, 1024.0, -768.0, 768.0)
    }
}

// ── ConfigError ─────────────────────────────────────────────────────

/// Errors detected during [`WorldConfig::validate()`].
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Pool capacity is zero.
    ZeroCapacity,
    /// Slot indices plus chain sentinels would not fit the u32 link
    /// arrays.
    CapacityOverflow {
        /// The configured capacity.
        capacity: usize,
    },
    /// No numbered collision groups configured.
    ZeroGroups,
    /// Bounds edges are unordered or NaN.
    InvalidBounds {
        /// The rejected rectangle.
        bounds: Bounds,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "capacity must be at least 1"),
            Self::CapacityOverflow { capacity } => {
                write!(f, "capacity {capacity} leaves no room for chain sentinels in a u32 index")
            }
            Self::ZeroGroups => write!(f, "collision_groups must be at least 1"),
            Self::InvalidBounds { bounds } => {
                write!(
                    f,
                    "bounds [{}, {}] x [{}, {}] do not enclose a region",
                    bounds.left, bounds.right, bounds.bottom, bounds.top
                )
            }
        }
    }
}

impl Error for ConfigError {}

// ── WorldConfig ─────────────────────────────────────────────────────

/// Complete configuration for constructing a
/// [`World`](crate::world::World).
///
/// Consumed by the world constructor. `validate()` checks all
/// structural invariants without allocating any storage.
pub struct WorldConfig {
    /// Fixed slot count of the object pool.
    pub capacity: usize,
    /// Number of numbered collision groups. Objects may also opt out
    /// of grouping entirely; the ungrouped bucket costs no group slot.
    pub collision_groups: u16,
    /// Cull rectangle for the bounds check stage.
    pub bounds: Bounds,
    /// Fork-join workers per parallel stage. `None` = auto-detect from
    /// available parallelism; explicit values are capped at
    /// [`MAX_WORKERS`].
    pub workers: Option<NonZeroUsize>,
    /// Asset store the world acquires and releases references through.
    /// `None` = an empty catalog that knows no assets.
    pub assets: Option<Box<dyn AssetStore>>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            capacity: 32_768,
            collision_groups: 16,
            bounds: Bounds::default(),
            workers: None,
            assets: None,
        }
    }
}

impl WorldConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. The pool must hold at least one object.
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        // 2. Slot indices plus two sentinels per chain must fit u32
        //    links; the collision set carries the most chains.
        let sentinels = 2 * (self.collision_groups as usize + 1);
        if self.capacity >= u32::MAX as usize - sentinels {
            return Err(ConfigError::CapacityOverflow {
                capacity: self.capacity,
            });
        }
        // 3. At least one numbered collision group.
        if self.collision_groups == 0 {
            return Err(ConfigError::ZeroGroups);
        }
        // 4. The cull rectangle must enclose a region.
        if !self.bounds.is_ordered() {
            return Err(ConfigError::InvalidBounds {
                bounds: self.bounds,
            });
        }
        Ok(())
    }

    /// Resolve the actual worker count, applying auto-detection if
    /// `None`.
    ///
    /// Explicit values are capped at [`MAX_WORKERS`]; zero workers is
    /// unrepresentable.
    pub fn resolved_worker_count(&self) -> usize {
        match self.workers {
            Some(n) => n.get().min(MAX_WORKERS),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .clamp(1, MAX_WORKERS),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
