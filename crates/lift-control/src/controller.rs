//! `LiftController` — the lift's state machine.
//!
//! ```text
//!            request (floor > current)           arrival == nearest up floor
//!   Idle ────────────────────────────▶ MovingUp ───────────────────────────▶ Idle
//!     │                                   │ other arrival: publish {floor, Up}
//!     │  request (floor <= current)       │ request: queue only
//!     └──────────────────────────▶ MovingDown ─────────────────────────────▶ Idle
//!                                             arrival == nearest down floor
//! ```
//!
//! The stop test compares the arriving floor with the *nearest* pending
//! destination beyond the floor being left, not with the leg's terminal
//! floor.  With several destinations queued in one direction the lift stops
//! at the first one it reaches and stays idle there; the remaining floors
//! wait for the next request to start a new leg.  Picking passengers up en
//! route and carrying on is not implemented.

use lift_core::{Direction, Floor, FloorRange, LiftEvent, LiftStatus};
use lift_engine::LiftEngine;
use tracing::{debug, info};

use crate::{ControlError, ControlResult, RequestQueue, StatusPublisher};

/// Coarse state derived from the current direction.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LiftState {
    Idle,
    MovingUp,
    MovingDown,
}

impl From<Direction> for LiftState {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up   => LiftState::MovingUp,
            Direction::Down => LiftState::MovingDown,
            Direction::None => LiftState::Idle,
        }
    }
}

/// Decides direction, drives the engine, and publishes statuses.
///
/// The controller never blocks and owns no clock: it reacts to one
/// [`LiftEvent`] at a time and talks outward only through [`LiftEngine`] and
/// [`StatusPublisher`].
#[derive(Clone, Debug)]
pub struct LiftController {
    current_floor: Floor,
    direction:     Direction,
    queue:         RequestQueue,
    range:         FloorRange,
}

impl LiftController {
    /// An idle controller resting at `starting_floor`.
    pub fn new(starting_floor: Floor, range: FloorRange) -> Self {
        Self {
            current_floor: starting_floor,
            direction:     Direction::None,
            queue:         RequestQueue::new(),
            range,
        }
    }

    /// Dispatch one event.  Move requests and calls are handled identically.
    pub fn handle<E: LiftEngine + ?Sized>(
        &mut self,
        event:     LiftEvent,
        engine:    &mut E,
        publisher: &mut StatusPublisher,
    ) -> ControlResult<()> {
        match event {
            LiftEvent::MoveRequest(floor) | LiftEvent::Call(floor) => {
                self.request(floor, engine, publisher)
            }
            LiftEvent::EngineArrivalUp(floor) => {
                self.arrived(event, Direction::Up, floor, engine, publisher)
            }
            LiftEvent::EngineArrivalDown(floor) => {
                self.arrived(event, Direction::Down, floor, engine, publisher)
            }
        }
    }

    /// Stop the lift where it is: cancel the leg, go idle, publish
    /// `{current, None}`.  Safe to call in any state, any number of times.
    pub fn stop<E: LiftEngine + ?Sized>(&mut self, engine: &mut E, publisher: &mut StatusPublisher) {
        engine.stop();
        self.direction = Direction::None;
        publisher.publish(self.status());
        info!(floor = %self.current_floor, "lift stopped");
    }

    pub fn status(&self) -> LiftStatus {
        LiftStatus::new(self.current_floor, self.direction)
    }

    pub fn state(&self) -> LiftState {
        self.direction.into()
    }

    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn queue(&self) -> &RequestQueue {
        &self.queue
    }

    pub fn range(&self) -> FloorRange {
        self.range
    }

    // ── Requests ──────────────────────────────────────────────────────────

    fn request<E: LiftEngine + ?Sized>(
        &mut self,
        floor:     Floor,
        engine:    &mut E,
        publisher: &mut StatusPublisher,
    ) -> ControlResult<()> {
        self.range.check(floor)?;

        if self.direction.is_moving() {
            let queued = self.enqueue(floor);
            debug!(%floor, %queued, moving = %self.direction, "request queued while moving");
            return Ok(());
        }

        // Equal floors take the downward branch and run a trivial leg.  The
        // floor is queued only once the engine has accepted the leg.
        let direction = if floor > self.current_floor { Direction::Up } else { Direction::Down };
        match direction {
            Direction::Up => {
                let last = self.queue.last_up_floor().map_or(floor, |last| last.max(floor));
                engine.start_moving_upwards(self.current_floor, last)?;
            }
            _ => {
                let last = self.queue.last_down_floor().map_or(floor, |last| last.min(floor));
                engine.start_moving_downwards(self.current_floor, last)?;
            }
        }
        self.enqueue(floor);
        self.direction = direction;
        info!(from = %self.current_floor, %floor, %direction, "lift departing");
        publisher.publish(self.status());
        Ok(())
    }

    /// Queue `floor` on the side of the current floor it lies.
    fn enqueue(&mut self, floor: Floor) -> Direction {
        if floor > self.current_floor {
            self.queue.add_up(floor);
            Direction::Up
        } else {
            self.queue.add_down(floor);
            Direction::Down
        }
    }

    // ── Arrivals ──────────────────────────────────────────────────────────

    fn arrived<E: LiftEngine + ?Sized>(
        &mut self,
        event:     LiftEvent,
        travel:    Direction,
        floor:     Floor,
        engine:    &mut E,
        publisher: &mut StatusPublisher,
    ) -> ControlResult<()> {
        if self.direction != travel {
            return Err(ControlError::UnexpectedArrival { event, direction: self.direction });
        }

        // Nearest destination is measured from the floor being left.  A
        // trivial leg arrives at the floor it started from.
        let stop = floor == self.current_floor
            || floor == self.next_floor(travel)?;
        self.current_floor = floor;

        if stop {
            match travel {
                Direction::Up => self.queue.remove_up(floor),
                _             => self.queue.remove_down(floor),
            };
            self.stop(engine, publisher);
        } else {
            debug!(%floor, direction = %travel, "passing floor");
            publisher.publish(self.status());
        }
        Ok(())
    }

    fn next_floor(&self, travel: Direction) -> ControlResult<Floor> {
        match travel {
            Direction::Up => self.queue.next_up_floor(self.current_floor),
            _             => self.queue.next_down_floor(self.current_floor),
        }
    }
}
