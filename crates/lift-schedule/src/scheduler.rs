//! The `Scheduler` trait shared by the virtual and wall-clock time sources.

use std::fmt;
use std::time::Duration;

use lift_core::Tick;

/// Handle for one scheduled timer.  Ids are unique per scheduler instance and
/// never reused.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerId({})", self.0)
    }
}

/// An injectable time source able to run a one-shot timer and cancel it.
///
/// The floor-event generator is written against this trait only, so pacing is
/// fully deterministic under [`VirtualScheduler`][crate::VirtualScheduler] and
/// real under [`ThreadScheduler`][crate::ThreadScheduler].
///
/// How a fired timer is reported differs per implementation (polling for the
/// virtual clock, a channel for the wall clock) and is not part of the trait.
pub trait Scheduler {
    /// The current time as seen by this scheduler.
    fn now(&self) -> Tick;

    /// Arrange for a timer to fire once `delay` has elapsed from `now()`.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer.
    ///
    /// Cancelling a timer that already fired, was already cancelled, or was
    /// never issued by this scheduler is a no-op.
    fn cancel(&mut self, timer: TimerId);
}
