//! Lift time model and configuration.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter where one
//! tick is one millisecond.  Schedulers report their notion of "now" as a
//! `Tick`; the virtual scheduler used in tests advances it by hand, the
//! wall-clock scheduler derives it from an `Instant` taken at construction.
//!
//! Using an integer tick as the canonical time unit keeps floor-interval
//! arithmetic exact and makes virtual-time tests fully deterministic.

use std::fmt;
use std::time::Duration;

use crate::{Floor, FloorRange, LiftError, LiftResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute time in milliseconds since the scheduler was created.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    /// The tick `delay` after `self`, truncated to whole milliseconds.
    /// Saturates at `u64::MAX`.
    #[inline]
    pub fn after(self, delay: Duration) -> Tick {
        Tick(self.0.saturating_add(ticks_for(delay)))
    }
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
#[inline]
pub fn ticks_for(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T+{}ms", self.0)
    }
}

// ── LiftConfig ────────────────────────────────────────────────────────────────

/// Longest accepted floor interval: one hour.
pub const MAX_FLOOR_INTERVAL_MS: u64 = 3_600_000;

/// Building and motor configuration for one lift.
///
/// Typically built in code or loaded from a JSON file by the application and
/// passed to `LiftBuilder`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LiftConfig {
    /// Lowest floor served (basements are negative).
    pub bottom_floor: i32,

    /// Highest floor served.
    pub top_floor: i32,

    /// Floor the cabin rests at when the lift is created.
    pub starting_floor: i32,

    /// Time taken to travel one floor, in milliseconds.
    pub floor_interval_ms: u64,
}

impl Default for LiftConfig {
    fn default() -> Self {
        Self {
            bottom_floor:      -10,
            top_floor:         30,
            starting_floor:    0,
            floor_interval_ms: 1_000,
        }
    }
}

impl LiftConfig {
    #[inline]
    pub fn range(&self) -> FloorRange {
        FloorRange::new(Floor(self.bottom_floor), Floor(self.top_floor))
    }

    #[inline]
    pub fn starting_floor(&self) -> Floor {
        Floor(self.starting_floor)
    }

    #[inline]
    pub fn floor_interval(&self) -> Duration {
        Duration::from_millis(self.floor_interval_ms)
    }

    /// Check the configuration for internal consistency.
    pub fn validate(&self) -> LiftResult<()> {
        if self.bottom_floor > self.top_floor {
            return Err(LiftError::Config(format!(
                "bottom floor {} is above top floor {}",
                self.bottom_floor, self.top_floor
            )));
        }
        if !self.range().contains(self.starting_floor()) {
            return Err(LiftError::Config(format!(
                "starting floor {} is outside {}",
                self.starting_floor,
                self.range()
            )));
        }
        if self.floor_interval_ms == 0 {
            return Err(LiftError::Config("floor interval must be non-zero".into()));
        }
        if self.floor_interval_ms > MAX_FLOOR_INTERVAL_MS {
            return Err(LiftError::Config(format!(
                "floor interval {} ms exceeds the {MAX_FLOOR_INTERVAL_MS} ms limit",
                self.floor_interval_ms
            )));
        }
        Ok(())
    }
}
