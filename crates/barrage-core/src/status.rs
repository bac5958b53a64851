//! The per-object status machine.

use std::fmt;

/// Lifecycle status of a pooled object.
///
/// Transitions are driven only by the tick pipeline and external calls:
/// `Active` objects may be marked for deletion (explicitly or by the
/// bounds cull) or for kill (explicitly only); marked objects are freed
/// exclusively during end-of-frame retirement, never mid-tick. An object
/// already marked is inert to further status-changing requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ObjectStatus {
    /// Live and ticking.
    #[default]
    Active,
    /// Scheduled for silent removal at the next retirement walk.
    MarkDelete,
    /// Scheduled for kill (player-visible removal) at the next retirement walk.
    MarkKill,
    /// Slot is on the free list; no object present.
    Free,
}

impl ObjectStatus {
    /// Whether the object is live and unmarked.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether the object is scheduled for retirement.
    pub fn is_marked(self) -> bool {
        matches!(self, Self::MarkDelete | Self::MarkKill)
    }
}

impl fmt::Display for ObjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::MarkDelete => write!(f, "mark-delete"),
            Self::MarkKill => write!(f, "mark-kill"),
            Self::Free => write!(f, "free"),
        }
    }
}
