//! `VirtualScheduler` — a manually advanced clock with a sparse timer queue.
//!
//! Time only moves when the owner asks it to.  `pop_due(until)` hands back the
//! earliest timer due at or before `until` and moves the clock to that
//! timer's deadline, so a caller that reacts to each timer (and possibly
//! schedules or cancels more) sees every deadline in order.
//!
//! # Ordering
//!
//! Timers are held in a `BTreeMap<Tick, VecDeque<TimerId>>`.  Distinct ticks
//! fire in ascending order; timers sharing a tick fire in the order they were
//! scheduled.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Duration;

use lift_core::Tick;
use tracing::trace;

use crate::{Scheduler, TimerId};

/// Deterministic time source for tests and offline simulation.
#[derive(Default, Debug)]
pub struct VirtualScheduler {
    now:      Tick,
    pending:  BTreeMap<Tick, VecDeque<TimerId>>,
    /// Deadline of every pending timer, for O(log W) cancellation.
    deadline: HashMap<TimerId, Tick>,
    next_id:  u64,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// advancing the clock to its deadline.
    ///
    /// Returns `None` (and leaves the clock alone) when nothing is due.
    pub fn pop_due(&mut self, until: Tick) -> Option<TimerId> {
        let mut entry = self.pending.first_entry()?;
        let tick = *entry.key();
        if tick > until {
            return None;
        }
        let queue = entry.get_mut();
        let timer = queue.pop_front()?;
        if queue.is_empty() {
            entry.remove();
        }
        self.deadline.remove(&timer);
        self.now = self.now.max(tick);
        trace!(%timer, now = %self.now, "virtual timer fired");
        Some(timer)
    }

    /// Move the clock forward to `tick` without firing anything.
    ///
    /// Moving backwards is ignored; virtual time is monotonic.
    pub fn advance_to(&mut self, tick: Tick) {
        self.now = self.now.max(tick);
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.deadline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadline.is_empty()
    }
}

impl Scheduler for VirtualScheduler {
    fn now(&self) -> Tick {
        self.now
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        let timer = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now.after(delay);
        self.pending.entry(due).or_default().push_back(timer);
        self.deadline.insert(timer, due);
        trace!(%timer, %due, "virtual timer scheduled");
        timer
    }

    fn cancel(&mut self, timer: TimerId) {
        let Some(due) = self.deadline.remove(&timer) else {
            return;
        };
        if let Some(queue) = self.pending.get_mut(&due) {
            queue.retain(|t| *t != timer);
            if queue.is_empty() {
                self.pending.remove(&due);
            }
        }
        trace!(%timer, %due, "virtual timer cancelled");
    }
}
