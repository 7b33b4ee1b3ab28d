//! Status observer trait and the observers that ship with the crate.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crossbeam_channel::Sender;
use lift_core::LiftStatus;
use tracing::debug;

/// Receives every [`LiftStatus`] the lift publishes.
///
/// Observers are called synchronously, in subscription order, while the lift
/// is processing the event that produced the status.
///
/// # Example — floor printer
///
/// ```rust,ignore
/// struct FloorPrinter;
///
/// impl StatusObserver for FloorPrinter {
///     fn on_status(&mut self, status: LiftStatus) {
///         println!("{status}");
///     }
/// }
/// ```
pub trait StatusObserver: Send {
    fn on_status(&mut self, status: LiftStatus);

    /// Called once when the lift is disposed.  No statuses follow.
    fn on_completed(&mut self) {}
}

/// A [`StatusObserver`] that does nothing.
pub struct NoopObserver;

impl StatusObserver for NoopObserver {
    fn on_status(&mut self, _status: LiftStatus) {}
}

/// Forwards statuses to another thread.  A receiver that hung up is not an
/// error for the lift; the status is dropped.
impl StatusObserver for Sender<LiftStatus> {
    fn on_status(&mut self, status: LiftStatus) {
        if self.send(status).is_err() {
            debug!(%status, "status receiver hung up");
        }
    }
}

// ── StatusLog ─────────────────────────────────────────────────────────────────

#[derive(Default)]
struct LogInner {
    statuses:    Vec<LiftStatus>,
    completions: usize,
}

/// Records every status into shared storage.
///
/// Clone the log before handing one copy to the lift; the other copy reads
/// what was recorded.
#[derive(Clone, Default)]
pub struct StatusLog {
    inner: Arc<Mutex<LogInner>>,
}

impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, in delivery order.
    pub fn statuses(&self) -> Vec<LiftStatus> {
        self.lock().statuses.clone()
    }

    pub fn last(&self) -> Option<LiftStatus> {
        self.lock().statuses.last().copied()
    }

    pub fn len(&self) -> usize {
        self.lock().statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().statuses.is_empty()
    }

    /// How many times `on_completed` was delivered.
    pub fn completions(&self) -> usize {
        self.lock().completions
    }

    pub fn clear(&self) {
        self.lock().statuses.clear();
    }

    fn lock(&self) -> MutexGuard<'_, LogInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StatusObserver for StatusLog {
    fn on_status(&mut self, status: LiftStatus) {
        self.lock().statuses.push(status);
    }

    fn on_completed(&mut self) {
        self.lock().completions += 1;
    }
}
