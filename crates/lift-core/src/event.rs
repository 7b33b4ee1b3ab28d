//! Events consumed by the lift and status snapshots it produces.

use std::fmt;

use crate::{Direction, Floor};

/// Everything the lift reacts to.
///
/// `MoveRequest` (a passenger inside the cabin picks a floor) and `Call` (a
/// passenger outside summons the lift) are handled identically.  The two
/// `EngineArrival*` variants are produced only by the floor-event generator.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LiftEvent {
    MoveRequest(Floor),
    Call(Floor),
    EngineArrivalUp(Floor),
    EngineArrivalDown(Floor),
}

impl LiftEvent {
    /// The floor carried by the event.
    #[inline]
    pub fn floor(self) -> Floor {
        match self {
            LiftEvent::MoveRequest(f)
            | LiftEvent::Call(f)
            | LiftEvent::EngineArrivalUp(f)
            | LiftEvent::EngineArrivalDown(f) => f,
        }
    }

    /// `true` for `EngineArrivalUp` / `EngineArrivalDown`.
    #[inline]
    pub fn is_arrival(self) -> bool {
        matches!(self, LiftEvent::EngineArrivalUp(_) | LiftEvent::EngineArrivalDown(_))
    }

    /// The arrival event for reaching `floor` while travelling `direction`.
    /// Returns `None` for `Direction::None`.
    pub fn arrival(direction: Direction, floor: Floor) -> Option<LiftEvent> {
        match direction {
            Direction::Up   => Some(LiftEvent::EngineArrivalUp(floor)),
            Direction::Down => Some(LiftEvent::EngineArrivalDown(floor)),
            Direction::None => None,
        }
    }
}

impl fmt::Display for LiftEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiftEvent::MoveRequest(floor)       => write!(f, "move request to {floor}"),
            LiftEvent::Call(floor)              => write!(f, "call from {floor}"),
            LiftEvent::EngineArrivalUp(floor)   => write!(f, "arrived at {floor} going up"),
            LiftEvent::EngineArrivalDown(floor) => write!(f, "arrived at {floor} going down"),
        }
    }
}

// ── LiftStatus ────────────────────────────────────────────────────────────────

/// Immutable snapshot published on every floor arrival and every stop.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiftStatus {
    pub current_floor:     Floor,
    pub current_direction: Direction,
}

impl LiftStatus {
    pub fn new(current_floor: Floor, current_direction: Direction) -> Self {
        Self { current_floor, current_direction }
    }

    /// `true` if this status marks the end of a leg.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        !self.current_direction.is_moving()
    }
}

impl fmt::Display for LiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.current_floor, self.current_direction)
    }
}
