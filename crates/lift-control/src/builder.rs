//! Fluent builder for constructing a [`Lift`].

use std::time::Duration;

use lift_core::time::ticks_for;
use lift_core::{Floor, LiftConfig};
use lift_schedule::Scheduler;

use crate::{ControlResult, Lift, StatusObserver};

/// Fluent builder for [`Lift<S>`].
///
/// # Required inputs
///
/// - `S: Scheduler` — [`VirtualScheduler`][lift_schedule::VirtualScheduler]
///   for tests, [`ThreadScheduler`][lift_schedule::ThreadScheduler] for real
///   time.
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                          |
/// |------------------------|----------------------------------|
/// | `.config(c)`           | `LiftConfig::default()`          |
/// | `.starting_floor(f)`   | `config.starting_floor`          |
/// | `.floor_interval(d)`   | `config.floor_interval_ms`       |
/// | `.observer(o)`         | no subscribers                   |
///
/// # Example
///
/// ```rust,ignore
/// let log = StatusLog::new();
/// let mut lift = LiftBuilder::new(VirtualScheduler::new())
///     .starting_floor(Floor(0))
///     .observer(Box::new(log.clone()))
///     .build()?;
/// lift.move_to(Floor(3))?;
/// lift.run_until_idle()?;
/// ```
pub struct LiftBuilder<S: Scheduler> {
    scheduler: S,
    config:    LiftConfig,
    observers: Vec<Box<dyn StatusObserver>>,
}

impl<S: Scheduler> LiftBuilder<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            config:    LiftConfig::default(),
            observers: Vec::new(),
        }
    }

    /// Replace the whole configuration.  Later setters adjust it.
    pub fn config(mut self, config: LiftConfig) -> Self {
        self.config = config;
        self
    }

    pub fn starting_floor(mut self, floor: Floor) -> Self {
        self.config.starting_floor = floor.0;
        self
    }

    /// Time to travel one floor, truncated to whole milliseconds.
    pub fn floor_interval(mut self, interval: Duration) -> Self {
        self.config.floor_interval_ms = ticks_for(interval);
        self
    }

    /// Subscribe `observer` before any status can be published.
    pub fn observer(mut self, observer: Box<dyn StatusObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Validate the configuration and return an idle lift.
    pub fn build(self) -> ControlResult<Lift<S>> {
        let mut lift = Lift::new(self.config, self.scheduler)?;
        for observer in self.observers {
            lift.subscribe(observer);
        }
        Ok(lift)
    }
}
