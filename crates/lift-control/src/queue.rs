//! `RequestQueue` — pending destinations split by direction of travel.

use lift_core::Floor;

use crate::{ControlError, ControlResult};

/// Two unordered bags of destination floors.
///
/// Floors are added on request and only removed when an arrival stops the
/// lift there.  Duplicates are allowed.  The four accessors fail with
/// [`ControlError::EmptyQueue`] when there is no candidate floor; the
/// controller's state machine never queries them in that state.
#[derive(Default, Clone, Debug)]
pub struct RequestQueue {
    going_up:   Vec<Floor>,
    going_down: Vec<Floor>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_up(&mut self, floor: Floor) {
        self.going_up.push(floor);
    }

    pub fn add_down(&mut self, floor: Floor) {
        self.going_down.push(floor);
    }

    /// Nearest up-destination strictly above `current`.
    pub fn next_up_floor(&self, current: Floor) -> ControlResult<Floor> {
        self.going_up
            .iter()
            .copied()
            .filter(|&f| f > current)
            .min()
            .ok_or(ControlError::EmptyQueue { operation: "next_up_floor" })
    }

    /// Highest up-destination: the terminal floor of an upward leg.
    pub fn last_up_floor(&self) -> ControlResult<Floor> {
        self.going_up
            .iter()
            .copied()
            .max()
            .ok_or(ControlError::EmptyQueue { operation: "last_up_floor" })
    }

    /// Nearest down-destination strictly below `current`.
    pub fn next_down_floor(&self, current: Floor) -> ControlResult<Floor> {
        self.going_down
            .iter()
            .copied()
            .filter(|&f| f < current)
            .max()
            .ok_or(ControlError::EmptyQueue { operation: "next_down_floor" })
    }

    /// Lowest down-destination: the terminal floor of a downward leg.
    pub fn last_down_floor(&self) -> ControlResult<Floor> {
        self.going_down
            .iter()
            .copied()
            .min()
            .ok_or(ControlError::EmptyQueue { operation: "last_down_floor" })
    }

    /// Drop every up-destination equal to `floor`; returns how many went.
    pub fn remove_up(&mut self, floor: Floor) -> usize {
        remove_all(&mut self.going_up, floor)
    }

    /// Drop every down-destination equal to `floor`; returns how many went.
    pub fn remove_down(&mut self, floor: Floor) -> usize {
        remove_all(&mut self.going_down, floor)
    }

    pub fn going_up(&self) -> &[Floor] {
        &self.going_up
    }

    pub fn going_down(&self) -> &[Floor] {
        &self.going_down
    }

    /// Total pending destinations in both directions.
    pub fn len(&self) -> usize {
        self.going_up.len() + self.going_down.len()
    }

    pub fn is_empty(&self) -> bool {
        self.going_up.is_empty() && self.going_down.is_empty()
    }
}

fn remove_all(floors: &mut Vec<Floor>, floor: Floor) -> usize {
    let before = floors.len();
    floors.retain(|&f| f != floor);
    before - floors.len()
}
