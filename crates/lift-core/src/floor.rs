//! Floor numbers and the building's floor range.
//!
//! Floors are signed: basements sit below the ground floor (`Floor(0)`).

use std::fmt;

use crate::{LiftError, LiftResult};

/// A floor number.  Ordering follows the building from bottom to top.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Floor(pub i32);

impl Floor {
    /// Number of floors between `self` and `other`, ignoring direction.
    #[inline]
    pub fn distance(self, other: Floor) -> u32 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── FloorRange ────────────────────────────────────────────────────────────────

/// Inclusive range of floors the lift may serve: `[bottom, top]`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorRange {
    pub bottom: Floor,
    pub top:    Floor,
}

impl FloorRange {
    pub fn new(bottom: Floor, top: Floor) -> Self {
        Self { bottom, top }
    }

    #[inline]
    pub fn contains(&self, floor: Floor) -> bool {
        self.bottom <= floor && floor <= self.top
    }

    /// Err with `FloorOutOfRange` unless `floor` lies in the range.
    pub fn check(&self, floor: Floor) -> LiftResult<()> {
        if self.contains(floor) {
            Ok(())
        } else {
            Err(LiftError::FloorOutOfRange { floor, range: *self })
        }
    }

    /// Number of floors served, counting both ends.
    pub fn len(&self) -> usize {
        if self.top < self.bottom {
            0
        } else {
            self.bottom.distance(self.top) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for FloorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.bottom, self.top)
    }
}
