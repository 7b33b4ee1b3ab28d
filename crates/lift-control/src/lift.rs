//! The `Lift` runtime: controller, engine, and publisher wired together.

use std::time::Duration;

use crossbeam_channel::{Receiver, never, select, unbounded};
use lift_core::{Floor, LiftConfig, LiftEvent, LiftStatus, Tick};
use lift_engine::FloorEventGenerator;
use lift_schedule::{Scheduler, ThreadScheduler, TimerId, VirtualScheduler};
use tracing::{debug, info, warn};

use crate::{
    ControlError, ControlResult, LiftController, LiftState, RequestQueue, StatusObserver,
    StatusPublisher, SubscriptionId,
};

/// One lift instance.
///
/// All controller mutation happens on the thread that owns the `Lift`.  The
/// generator hands arrivals over a single-consumer channel which is drained
/// after every timer, so each event (including all of its status
/// notifications) is fully processed before the next one is looked at.
///
/// The scheduler type decides how time passes:
///
/// | `S`                 | Driven by                                        |
/// |---------------------|--------------------------------------------------|
/// | `VirtualScheduler`  | [`advance_by`][Lift::advance_by], [`run_until_idle`][Lift::run_until_idle] |
/// | `ThreadScheduler`   | [`serve`][Lift::serve]                           |
///
/// Create via [`LiftBuilder`][crate::LiftBuilder] or [`Lift::new`].  Dropping
/// the lift disposes it.
pub struct Lift<S: Scheduler> {
    config:            LiftConfig,
    controller:        LiftController,
    pub(crate) engine: FloorEventGenerator<S>,
    publisher:         StatusPublisher,
    arrivals:          Receiver<LiftEvent>,
}

impl<S: Scheduler> Lift<S> {
    /// Validate `config` and build an idle lift at its starting floor.
    pub fn new(config: LiftConfig, scheduler: S) -> ControlResult<Self> {
        config.validate()?;
        let (tx, arrivals) = unbounded();
        let mut engine = FloorEventGenerator::new(scheduler, config.floor_interval());
        engine.register(tx);
        let controller = LiftController::new(config.starting_floor(), config.range());
        info!(
            floor = %config.starting_floor(),
            range = %config.range(),
            interval_ms = config.floor_interval_ms,
            "lift ready"
        );
        Ok(Self {
            config,
            controller,
            engine,
            publisher: StatusPublisher::new(),
            arrivals,
        })
    }

    // ── Requests ──────────────────────────────────────────────────────────

    /// A passenger inside the cabin selects `floor`.
    pub fn move_to(&mut self, floor: Floor) -> ControlResult<()> {
        self.dispatch(LiftEvent::MoveRequest(floor))
    }

    /// A passenger outside summons the lift to `floor`.
    pub fn call(&mut self, floor: Floor) -> ControlResult<()> {
        self.dispatch(LiftEvent::Call(floor))
    }

    /// Submit an external event.  Engine arrivals are refused with
    /// [`ControlError::ForeignArrival`].
    pub fn submit(&mut self, event: LiftEvent) -> ControlResult<()> {
        if event.is_arrival() {
            return Err(ControlError::ForeignArrival(event));
        }
        self.dispatch(event)
    }

    /// Stop wherever the cabin is.  Pending destinations stay queued.
    pub fn stop(&mut self) {
        self.controller.stop(&mut self.engine, &mut self.publisher);
    }

    // ── Observers ─────────────────────────────────────────────────────────

    pub fn subscribe(&mut self, observer: Box<dyn StatusObserver>) -> SubscriptionId {
        self.publisher.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.publisher.unsubscribe(id)
    }

    /// Halt the engine and send the terminal signal to every subscriber.
    /// Idempotent.
    pub fn dispose(&mut self) {
        if self.publisher.is_completed() {
            return;
        }
        self.engine.stop();
        self.publisher.complete();
        info!(floor = %self.controller.current_floor(), "lift disposed");
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn status(&self) -> LiftStatus {
        self.controller.status()
    }

    pub fn state(&self) -> LiftState {
        self.controller.state()
    }

    pub fn queue(&self) -> &RequestQueue {
        self.controller.queue()
    }

    pub fn config(&self) -> &LiftConfig {
        &self.config
    }

    /// `true` while the engine still has a leg in flight.
    pub fn engine_active(&self) -> bool {
        self.engine.is_active()
    }

    // ── Event plumbing ────────────────────────────────────────────────────

    fn dispatch(&mut self, event: LiftEvent) -> ControlResult<()> {
        debug!(%event, "dispatching");
        self.controller.handle(event, &mut self.engine, &mut self.publisher)
    }

    /// Let the generator react to `timer`, then process whatever it emitted.
    fn on_timer(&mut self, timer: TimerId) -> ControlResult<()> {
        self.engine.fire(timer)?;
        while let Ok(event) = self.arrivals.try_recv() {
            self.dispatch(event)?;
        }
        Ok(())
    }
}

impl<S: Scheduler> Drop for Lift<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

// ── Virtual time ──────────────────────────────────────────────────────────────

impl Lift<VirtualScheduler> {
    /// Current virtual time.
    pub fn now(&self) -> Tick {
        self.engine.scheduler().now()
    }

    /// Advance virtual time by `by`, delivering every arrival due on the way
    /// in time order.
    ///
    /// The clock ends at `now + by` even when an arrival fails; the error is
    /// returned once the clock has moved.
    pub fn advance_by(&mut self, by: Duration) -> ControlResult<()> {
        let until = self.now().after(by);
        let delivered = self.deliver_until(until);
        self.engine.scheduler_mut().advance_to(until);
        delivered
    }

    /// Deliver arrivals until no timer is pending.  Virtual time ends at the
    /// last arrival.
    pub fn run_until_idle(&mut self) -> ControlResult<()> {
        self.deliver_until(Tick(u64::MAX))
    }

    fn deliver_until(&mut self, until: Tick) -> ControlResult<()> {
        while let Some(timer) = self.engine.scheduler_mut().pop_due(until) {
            self.on_timer(timer)?;
        }
        Ok(())
    }
}

// ── Wall-clock time ───────────────────────────────────────────────────────────

impl Lift<ThreadScheduler> {
    /// Serve `requests` in real time until the channel closes.
    ///
    /// Requests and timer fires are interleaved with `select!` on this thread.
    /// Refused requests (out of range, forged arrivals) are logged and
    /// skipped; contract violations end the loop with an error.  Once the
    /// request channel closes, the current leg is allowed to finish and the
    /// lift is disposed.
    pub fn serve(&mut self, requests: &Receiver<LiftEvent>) -> ControlResult<()> {
        let fired = self.engine.scheduler().fired().clone();
        let mut requests = requests.clone();
        let mut open = true;
        info!("lift serving requests");

        while open || self.controller.direction().is_moving() {
            select! {
                recv(requests) -> msg => match msg {
                    Ok(event) => match self.submit(event) {
                        Err(e) if e.is_rejected_request() => warn!(%event, error = %e, "request refused"),
                        other => other?,
                    },
                    Err(_) => {
                        debug!("request channel closed");
                        open = false;
                    }
                },
                recv(fired) -> msg => {
                    // The scheduler holds a sender, so `fired` never disconnects.
                    if let Ok(timer) = msg {
                        if self.engine.scheduler_mut().acknowledge(timer) {
                            self.on_timer(timer)?;
                        }
                    }
                }
            }
            if !open {
                requests = never();
            }
        }

        self.dispose();
        Ok(())
    }
}
