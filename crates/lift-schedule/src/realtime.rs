//! `ThreadScheduler` — wall-clock timers delivered over a channel.
//!
//! Each scheduled timer is a short-lived thread that sleeps for the delay and
//! then sends its `TimerId` on a shared `crossbeam-channel`.  The owner
//! `select!`s on [`fired`][ThreadScheduler::fired] alongside its other inputs,
//! which keeps every reaction to a timer on the owner's thread.
//!
//! Cancellation flips a per-timer flag.  A timer thread that already passed
//! its flag check may still send; [`acknowledge`][ThreadScheduler::acknowledge]
//! filters those out.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};
use lift_core::Tick;
use lift_core::time::ticks_for;
use tracing::{debug, trace};

use crate::{Scheduler, TimerId};

/// Production time source backed by `std::thread::sleep`.
pub struct ThreadScheduler {
    epoch:     Instant,
    next_id:   u64,
    /// Cancel flag of every timer that has not been acknowledged yet.
    live:      HashMap<TimerId, Arc<AtomicBool>>,
    fired_tx:  Sender<TimerId>,
    fired_rx:  Receiver<TimerId>,
}

impl ThreadScheduler {
    pub fn new() -> Self {
        let (fired_tx, fired_rx) = unbounded();
        Self {
            epoch: Instant::now(),
            next_id: 0,
            live: HashMap::new(),
            fired_tx,
            fired_rx,
        }
    }

    /// Channel on which fired timers are reported.
    pub fn fired(&self) -> &Receiver<TimerId> {
        &self.fired_rx
    }

    /// Retire a fired timer.  Returns `false` if it was cancelled (or is
    /// unknown), in which case the fire must be ignored.
    pub fn acknowledge(&mut self, timer: TimerId) -> bool {
        match self.live.remove(&timer) {
            Some(cancelled) => !cancelled.load(Ordering::Acquire),
            None => {
                trace!(%timer, "ignoring fire of retired timer");
                false
            }
        }
    }

    /// Number of timers scheduled but not yet acknowledged or cancelled.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl Default for ThreadScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ThreadScheduler {
    fn now(&self) -> Tick {
        Tick(ticks_for(self.epoch.elapsed()))
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        let timer = TimerId(self.next_id);
        self.next_id += 1;

        let cancelled = Arc::new(AtomicBool::new(false));
        self.live.insert(timer, Arc::clone(&cancelled));

        let tx = self.fired_tx.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            if cancelled.load(Ordering::Acquire) {
                return;
            }
            if tx.send(timer).is_err() {
                debug!(%timer, "timer fired after its scheduler was dropped");
            }
        });
        trace!(%timer, ?delay, "wall-clock timer scheduled");
        timer
    }

    fn cancel(&mut self, timer: TimerId) {
        if let Some(cancelled) = self.live.remove(&timer) {
            cancelled.store(true, Ordering::Release);
            trace!(%timer, "wall-clock timer cancelled");
        }
    }
}
