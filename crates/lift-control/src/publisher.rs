//! `StatusPublisher` — synchronous fan-out of lift statuses.

use std::collections::BTreeMap;
use std::fmt;

use lift_core::LiftStatus;
use tracing::{debug, trace};

use crate::StatusObserver;

/// Handle returned by [`StatusPublisher::subscribe`].  Pass it to
/// [`unsubscribe`][StatusPublisher::unsubscribe] to detach.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriptionId({})", self.0)
    }
}

/// Broadcasts each status to every subscriber, in subscription order, before
/// returning.  Nothing is buffered or dropped.
///
/// Ids increase monotonically, so iterating the `BTreeMap` visits
/// subscribers in the order they subscribed.
#[derive(Default)]
pub struct StatusPublisher {
    observers: BTreeMap<SubscriptionId, Box<dyn StatusObserver>>,
    next_id:   u64,
    completed: bool,
}

impl StatusPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `observer`.
    ///
    /// Subscribing after [`complete`][Self::complete] delivers `on_completed`
    /// immediately and registers nothing; the returned id is already
    /// detached.
    pub fn subscribe(&mut self, mut observer: Box<dyn StatusObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        if self.completed {
            observer.on_completed();
            debug!(%id, "late subscriber completed immediately");
        } else {
            self.observers.insert(id, observer);
            debug!(%id, subscribers = self.observers.len(), "subscriber attached");
        }
        id
    }

    /// Detach a subscriber.  Returns `false` if the id was not attached.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.observers.remove(&id).is_some();
        if removed {
            debug!(%id, "subscriber detached");
        }
        removed
    }

    /// Deliver `status` to every subscriber.  Ignored once completed.
    pub fn publish(&mut self, status: LiftStatus) {
        if self.completed {
            trace!(%status, "status after completion dropped");
            return;
        }
        trace!(%status, subscribers = self.observers.len(), "publishing status");
        for observer in self.observers.values_mut() {
            observer.on_status(status);
        }
    }

    /// Send the terminal signal to every subscriber, once.  Later calls do
    /// nothing.
    pub fn complete(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        for observer in self.observers.values_mut() {
            observer.on_completed();
        }
        debug!(subscribers = self.observers.len(), "status stream completed");
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Number of attached subscribers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
