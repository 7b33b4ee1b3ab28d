//! `FloorEventGenerator<S>` — paced, cancellable floor-arrival legs.

use std::time::Duration;

use crossbeam_channel::Sender;
use lift_core::{Direction, Floor, LiftEvent};
use lift_schedule::{Scheduler, TimerId};
use tracing::{debug, trace};

use crate::{EngineError, EngineResult, LiftEngine};

/// One run of the motor in a single direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Leg {
    direction: Direction,
    /// Floor announced when `timer` fires.
    next:      Floor,
    /// Terminal floor; the leg ends after announcing it.
    last:      Floor,
    interval:  Duration,
    timer:     TimerId,
}

/// Produces `EngineArrivalUp/Down` events one floor at a time, spaced by a
/// fixed interval on an injected [`Scheduler`].
///
/// At most one timer is outstanding: the next floor is only scheduled once
/// the current one has been announced.  Cancelling that single timer is
/// therefore enough to guarantee no further arrivals for the leg.
///
/// Arrivals go to a single consumer registered with
/// [`register`][Self::register].  Firing with no consumer registered is a
/// contract violation reported as [`EngineError::UninitializedConsumer`].
pub struct FloorEventGenerator<S: Scheduler> {
    scheduler: S,
    /// Interval used by the [`LiftEngine`] entry points.
    interval:  Duration,
    consumer:  Option<Sender<LiftEvent>>,
    leg:       Option<Leg>,
}

impl<S: Scheduler> FloorEventGenerator<S> {
    pub fn new(scheduler: S, interval: Duration) -> Self {
        Self {
            scheduler,
            interval,
            consumer: None,
            leg:      None,
        }
    }

    /// Register the lift that receives every arrival.  Replaces any previous
    /// consumer.
    pub fn register(&mut self, consumer: Sender<LiftEvent>) {
        self.consumer = Some(consumer);
    }

    /// Begin a leg announcing each floor from the one after `from` through
    /// `to`, one every `interval`.
    ///
    /// A trivial leg (`from == to`) announces `to` once, after one interval.
    /// Any active leg is cancelled first.
    pub fn start(
        &mut self,
        direction: Direction,
        from:      Floor,
        to:        Floor,
        interval:  Duration,
    ) -> EngineResult<()> {
        let wrong_side = match direction {
            Direction::Up   => to < from,
            Direction::Down => to > from,
            Direction::None => true,
        };
        if wrong_side {
            return Err(EngineError::InvalidLeg { direction, from, to });
        }

        self.stop();

        let next = if from == to { to } else { Floor(from.0 + direction.step()) };
        let timer = self.scheduler.schedule(interval);
        self.leg = Some(Leg { direction, next, last: to, interval, timer });
        debug!(%direction, %from, %to, ?interval, "leg started");
        Ok(())
    }

    /// Cancel the active leg.  Arrivals already delivered stay delivered.
    pub fn stop(&mut self) {
        if let Some(leg) = self.leg.take() {
            self.scheduler.cancel(leg.timer);
            debug!(direction = %leg.direction, pending = %leg.next, "leg stopped");
        }
    }

    /// React to a fired timer.
    ///
    /// If `timer` is the active leg's pending arrival, the arrival is sent to
    /// the consumer and the following floor (if any) is scheduled.  Returns
    /// the event sent, or `None` for a timer this generator no longer owns
    /// (superseded or cancelled).
    pub fn fire(&mut self, timer: TimerId) -> EngineResult<Option<LiftEvent>> {
        let Some(leg) = self.leg.filter(|leg| leg.timer == timer) else {
            trace!(%timer, "ignoring stale floor timer");
            return Ok(None);
        };
        let consumer = self.consumer.as_ref().ok_or(EngineError::UninitializedConsumer)?;
        let Some(event) = LiftEvent::arrival(leg.direction, leg.next) else {
            return Ok(None);
        };
        consumer.send(event).map_err(|_| EngineError::ConsumerDisconnected)?;
        trace!(%event, now = %self.scheduler.now(), "arrival emitted");

        self.leg = if leg.next == leg.last {
            debug!(last = %leg.last, "leg complete");
            None
        } else {
            let timer = self.scheduler.schedule(leg.interval);
            Some(Leg { next: Floor(leg.next.0 + leg.direction.step()), timer, ..leg })
        };
        Ok(Some(event))
    }

    /// `true` while a leg has arrivals left to announce.
    pub fn is_active(&self) -> bool {
        self.leg.is_some()
    }

    /// Direction of the active leg, `Direction::None` when idle.
    pub fn direction(&self) -> Direction {
        self.leg.map_or(Direction::None, |leg| leg.direction)
    }

    /// The configured per-floor interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<S: Scheduler> LiftEngine for FloorEventGenerator<S> {
    fn start_moving_upwards(&mut self, from: Floor, last_up_floor: Floor) -> EngineResult<()> {
        self.start(Direction::Up, from, last_up_floor, self.interval)
    }

    fn start_moving_downwards(&mut self, from: Floor, last_down_floor: Floor) -> EngineResult<()> {
        self.start(Direction::Down, from, last_down_floor, self.interval)
    }

    fn stop(&mut self) {
        FloorEventGenerator::stop(self);
    }
}
