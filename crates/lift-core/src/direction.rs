//! Direction of travel shared by the controller, the engine, and observers.

/// Which way the cabin is moving.
///
/// `None` holds exactly when no floor-event leg is active.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    /// Stationary (default state).
    #[default]
    None,
}

impl Direction {
    /// `true` for `Up` and `Down`.
    #[inline]
    pub fn is_moving(self) -> bool {
        !matches!(self, Direction::None)
    }

    /// Floor offset of one step in this direction: `+1`, `-1`, or `0`.
    #[inline]
    pub fn step(self) -> i32 {
        match self {
            Direction::Up   => 1,
            Direction::Down => -1,
            Direction::None => 0,
        }
    }

    /// Human-readable label, used for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up   => "up",
            Direction::Down => "down",
            Direction::None => "none",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
