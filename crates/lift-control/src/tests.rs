//! Integration tests for lift-control.

use std::time::Duration;

use lift_core::{Direction, Floor, LiftConfig, LiftError, LiftEvent, LiftStatus, Tick};
use lift_engine::{EngineError, EngineResult, LiftEngine};
use lift_schedule::VirtualScheduler;

use crate::{
    ControlError, Lift, LiftBuilder, LiftController, LiftState, RequestQueue, StatusLog,
    StatusObserver, StatusPublisher,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const FLOOR_INTERVAL: Duration = Duration::from_millis(1_000);

fn status(floor: i32, direction: Direction) -> LiftStatus {
    LiftStatus::new(Floor(floor), direction)
}

/// A virtual-time lift at `start` with a recording subscriber attached.
fn lift_at(start: i32) -> (Lift<VirtualScheduler>, StatusLog) {
    let log = StatusLog::new();
    let lift = LiftBuilder::new(VirtualScheduler::new())
        .starting_floor(Floor(start))
        .floor_interval(FLOOR_INTERVAL)
        .observer(Box::new(log.clone()))
        .build()
        .unwrap();
    (lift, log)
}

/// Engine stand-in that records every call made by the controller.
#[derive(Default)]
struct RecordingEngine {
    calls: Vec<EngineCall>,
}

#[derive(Debug, PartialEq, Eq)]
enum EngineCall {
    Up(Floor, Floor),
    Down(Floor, Floor),
    Stop,
}

impl LiftEngine for RecordingEngine {
    fn start_moving_upwards(&mut self, from: Floor, last: Floor) -> EngineResult<()> {
        self.calls.push(EngineCall::Up(from, last));
        Ok(())
    }

    fn start_moving_downwards(&mut self, from: Floor, last: Floor) -> EngineResult<()> {
        self.calls.push(EngineCall::Down(from, last));
        Ok(())
    }

    fn stop(&mut self) {
        self.calls.push(EngineCall::Stop);
    }
}

/// Engine stand-in that rejects every leg.
struct RefusingEngine;

impl LiftEngine for RefusingEngine {
    fn start_moving_upwards(&mut self, from: Floor, last: Floor) -> EngineResult<()> {
        Err(EngineError::InvalidLeg { direction: Direction::Up, from, to: last })
    }

    fn start_moving_downwards(&mut self, from: Floor, last: Floor) -> EngineResult<()> {
        Err(EngineError::InvalidLeg { direction: Direction::Down, from, to: last })
    }

    fn stop(&mut self) {}
}

fn controller_at(start: i32) -> (LiftController, RecordingEngine, StatusPublisher, StatusLog) {
    let log = StatusLog::new();
    let mut publisher = StatusPublisher::new();
    publisher.subscribe(Box::new(log.clone()));
    let controller = LiftController::new(Floor(start), LiftConfig::default().range());
    (controller, RecordingEngine::default(), publisher, log)
}

// ── RequestQueue ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use super::*;

    #[test]
    fn next_up_is_nearest_above_current() {
        let mut q = RequestQueue::new();
        q.add_up(Floor(7));
        q.add_up(Floor(3));
        q.add_up(Floor(5));
        assert_eq!(q.next_up_floor(Floor(0)).unwrap(), Floor(3));
        assert_eq!(q.next_up_floor(Floor(3)).unwrap(), Floor(5));
        assert_eq!(q.last_up_floor().unwrap(), Floor(7));
    }

    #[test]
    fn next_down_is_nearest_below_current() {
        let mut q = RequestQueue::new();
        q.add_down(Floor(-2));
        q.add_down(Floor(1));
        assert_eq!(q.next_down_floor(Floor(4)).unwrap(), Floor(1));
        assert_eq!(q.next_down_floor(Floor(1)).unwrap(), Floor(-2));
        assert_eq!(q.last_down_floor().unwrap(), Floor(-2));
    }

    #[test]
    fn empty_queries_name_the_operation() {
        let q = RequestQueue::new();
        assert_eq!(
            q.next_up_floor(Floor(0)),
            Err(ControlError::EmptyQueue { operation: "next_up_floor" })
        );
        assert_eq!(
            q.next_down_floor(Floor(0)),
            Err(ControlError::EmptyQueue { operation: "next_down_floor" })
        );
        assert_eq!(q.last_up_floor(), Err(ControlError::EmptyQueue { operation: "last_up_floor" }));
        assert_eq!(
            q.last_down_floor(),
            Err(ControlError::EmptyQueue { operation: "last_down_floor" })
        );
    }

    #[test]
    fn no_candidate_beyond_current_is_empty() {
        let mut q = RequestQueue::new();
        q.add_up(Floor(2));
        assert!(matches!(q.next_up_floor(Floor(2)), Err(ControlError::EmptyQueue { .. })));
        assert_eq!(q.last_up_floor().unwrap(), Floor(2), "last ignores current floor");
    }

    #[test]
    fn remove_drops_duplicates() {
        let mut q = RequestQueue::new();
        q.add_up(Floor(4));
        q.add_up(Floor(4));
        q.add_up(Floor(6));
        assert_eq!(q.remove_up(Floor(4)), 2);
        assert_eq!(q.going_up(), &[Floor(6)]);
        assert_eq!(q.remove_down(Floor(4)), 0);
        assert_eq!(q.len(), 1);
    }
}

// ── LiftController (against a recording engine) ───────────────────────────────

#[cfg(test)]
mod controller {
    use super::*;

    #[test]
    fn starts_idle_at_starting_floor() {
        let (c, ..) = controller_at(4);
        assert_eq!(c.state(), LiftState::Idle);
        assert_eq!(c.status(), status(4, Direction::None));
    }

    #[test]
    fn higher_floor_starts_upward_leg_to_last_up_floor() {
        let (mut c, mut engine, mut publisher, log) = controller_at(0);
        c.handle(LiftEvent::MoveRequest(Floor(3)), &mut engine, &mut publisher).unwrap();
        assert_eq!(engine.calls, vec![EngineCall::Up(Floor(0), Floor(3))]);
        assert_eq!(c.state(), LiftState::MovingUp);
        assert_eq!(log.statuses(), vec![status(0, Direction::Up)]);
    }

    #[test]
    fn lower_floor_starts_downward_leg() {
        let (mut c, mut engine, mut publisher, log) = controller_at(1);
        c.handle(LiftEvent::Call(Floor(0)), &mut engine, &mut publisher).unwrap();
        assert_eq!(engine.calls, vec![EngineCall::Down(Floor(1), Floor(0))]);
        assert_eq!(log.statuses(), vec![status(1, Direction::Down)]);
    }

    #[test]
    fn same_floor_takes_downward_branch() {
        let (mut c, mut engine, mut publisher, _log) = controller_at(2);
        c.handle(LiftEvent::MoveRequest(Floor(2)), &mut engine, &mut publisher).unwrap();
        assert_eq!(engine.calls, vec![EngineCall::Down(Floor(2), Floor(2))]);
        assert_eq!(c.state(), LiftState::MovingDown);
    }

    #[test]
    fn request_while_moving_is_only_queued() {
        let (mut c, mut engine, mut publisher, log) = controller_at(0);
        c.handle(LiftEvent::MoveRequest(Floor(3)), &mut engine, &mut publisher).unwrap();
        c.handle(LiftEvent::Call(Floor(-1)), &mut engine, &mut publisher).unwrap();
        c.handle(LiftEvent::Call(Floor(8)), &mut engine, &mut publisher).unwrap();
        assert_eq!(engine.calls.len(), 1, "in-flight leg untouched");
        assert_eq!(log.len(), 1, "no status for queued requests");
        assert_eq!(c.queue().going_down(), &[Floor(-1)]);
        assert_eq!(c.queue().going_up(), &[Floor(3), Floor(8)]);
    }

    #[test]
    fn arrival_short_of_destination_keeps_moving() {
        let (mut c, mut engine, mut publisher, log) = controller_at(0);
        c.handle(LiftEvent::MoveRequest(Floor(3)), &mut engine, &mut publisher).unwrap();
        c.handle(LiftEvent::EngineArrivalUp(Floor(1)), &mut engine, &mut publisher).unwrap();
        assert_eq!(c.current_floor(), Floor(1));
        assert_eq!(c.state(), LiftState::MovingUp);
        assert_eq!(log.last(), Some(status(1, Direction::Up)));
    }

    #[test]
    fn arrival_at_destination_stops_and_dequeues() {
        let (mut c, mut engine, mut publisher, log) = controller_at(2);
        c.handle(LiftEvent::MoveRequest(Floor(1)), &mut engine, &mut publisher).unwrap();
        c.handle(LiftEvent::EngineArrivalDown(Floor(1)), &mut engine, &mut publisher).unwrap();
        assert_eq!(engine.calls.last(), Some(&EngineCall::Stop));
        assert_eq!(c.state(), LiftState::Idle);
        assert!(c.queue().is_empty());
        assert_eq!(log.last(), Some(status(1, Direction::None)));
    }

    #[test]
    fn arrival_in_wrong_direction_is_a_contract_violation() {
        let (mut c, mut engine, mut publisher, _log) = controller_at(0);
        let event = LiftEvent::EngineArrivalDown(Floor(-1));
        assert_eq!(
            c.handle(event, &mut engine, &mut publisher),
            Err(ControlError::UnexpectedArrival { event, direction: Direction::None })
        );
    }

    #[test]
    fn out_of_range_request_is_refused() {
        let (mut c, mut engine, mut publisher, log) = controller_at(0);
        let err = c
            .handle(LiftEvent::MoveRequest(Floor(31)), &mut engine, &mut publisher)
            .unwrap_err();
        assert!(matches!(err, ControlError::Lift(LiftError::FloorOutOfRange { .. })));
        assert!(err.is_rejected_request());
        assert!(engine.calls.is_empty());
        assert!(c.queue().is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn stop_twice_is_harmless() {
        let (mut c, mut engine, mut publisher, log) = controller_at(0);
        c.handle(LiftEvent::MoveRequest(Floor(3)), &mut engine, &mut publisher).unwrap();
        c.stop(&mut engine, &mut publisher);
        c.stop(&mut engine, &mut publisher);
        assert_eq!(c.state(), LiftState::Idle);
        assert_eq!(engine.calls[1..], [EngineCall::Stop, EngineCall::Stop]);
        assert_eq!(log.last(), Some(status(0, Direction::None)));
        assert_eq!(c.queue().going_up(), &[Floor(3)], "manual stop keeps destinations");
    }

    #[test]
    fn refused_leg_leaves_nothing_queued() {
        let (mut c, _engine, mut publisher, log) = controller_at(0);
        let err = c
            .handle(LiftEvent::MoveRequest(Floor(3)), &mut RefusingEngine, &mut publisher)
            .unwrap_err();
        assert!(matches!(err, ControlError::Engine(EngineError::InvalidLeg { .. })));
        assert_eq!(c.state(), LiftState::Idle);
        assert!(c.queue().is_empty());
        assert!(log.is_empty());

        c.handle(LiftEvent::Call(Floor(-2)), &mut RefusingEngine, &mut publisher).unwrap_err();
        assert!(c.queue().is_empty());
    }

    #[test]
    fn departure_leg_runs_to_farthest_queued_floor() {
        let (mut c, mut engine, mut publisher, _log) = controller_at(0);
        c.handle(LiftEvent::MoveRequest(Floor(4)), &mut engine, &mut publisher).unwrap();
        c.stop(&mut engine, &mut publisher);
        c.handle(LiftEvent::MoveRequest(Floor(2)), &mut engine, &mut publisher).unwrap();
        assert_eq!(engine.calls.last(), Some(&EngineCall::Up(Floor(0), Floor(4))));
        assert_eq!(c.queue().going_up(), &[Floor(4), Floor(2)]);
    }
}

// ── Lift on virtual time ──────────────────────────────────────────────────────

#[cfg(test)]
mod virtual_time {
    use super::*;

    #[test]
    fn ground_to_third_publishes_every_floor() {
        let (mut lift, log) = lift_at(0);
        lift.move_to(Floor(3)).unwrap();
        lift.run_until_idle().unwrap();
        assert_eq!(
            log.statuses(),
            vec![
                status(0, Direction::Up),
                status(1, Direction::Up),
                status(2, Direction::Up),
                status(3, Direction::None),
            ]
        );
        assert_eq!(lift.now().0, 3_000);
    }

    #[test]
    fn third_to_first_publishes_every_floor() {
        let (mut lift, log) = lift_at(3);
        lift.move_to(Floor(1)).unwrap();
        lift.run_until_idle().unwrap();
        assert_eq!(
            log.statuses(),
            vec![status(3, Direction::Down), status(2, Direction::Down), status(1, Direction::None)]
        );
    }

    #[test]
    fn every_journey_ends_stopped_at_destination() {
        for start in -3..=3 {
            for dest in -3..=3 {
                let (mut lift, log) = lift_at(start);
                lift.move_to(Floor(dest)).unwrap();
                lift.run_until_idle().unwrap();
                assert_eq!(
                    log.last(),
                    Some(status(dest, Direction::None)),
                    "start {start}, destination {dest}"
                );
                assert_eq!(lift.state(), LiftState::Idle);
                assert!(!lift.engine_active());
            }
        }
    }

    #[test]
    fn same_floor_runs_a_trivial_leg() {
        let (mut lift, log) = lift_at(2);
        lift.move_to(Floor(2)).unwrap();
        assert_eq!(log.statuses(), vec![status(2, Direction::Down)]);
        lift.run_until_idle().unwrap();
        assert_eq!(log.statuses(), vec![status(2, Direction::Down), status(2, Direction::None)]);
        assert!(lift.queue().is_empty());
    }

    #[test]
    fn call_behaves_like_move_request() {
        let (mut lift, log) = lift_at(0);
        lift.call(Floor(2)).unwrap();
        lift.run_until_idle().unwrap();
        assert_eq!(
            log.statuses(),
            vec![status(0, Direction::Up), status(1, Direction::Up), status(2, Direction::None)]
        );
    }

    #[test]
    fn arrivals_are_paced_by_floor_interval() {
        let (mut lift, log) = lift_at(0);
        lift.move_to(Floor(2)).unwrap();
        assert_eq!(log.len(), 1, "departure status is immediate");

        lift.advance_by(Duration::from_millis(999)).unwrap();
        assert_eq!(log.len(), 1);

        lift.advance_by(Duration::from_millis(1)).unwrap();
        assert_eq!(log.last(), Some(status(1, Direction::Up)));

        lift.advance_by(FLOOR_INTERVAL).unwrap();
        assert_eq!(log.last(), Some(status(2, Direction::None)));
        assert_eq!(lift.now().0, 2_000);
    }

    #[test]
    fn stop_mid_leg_suppresses_remaining_arrivals() {
        let (mut lift, log) = lift_at(0);
        lift.move_to(Floor(5)).unwrap();
        lift.advance_by(FLOOR_INTERVAL * 2).unwrap();
        lift.stop();
        lift.stop();
        lift.advance_by(FLOOR_INTERVAL * 10).unwrap();
        assert_eq!(lift.status(), status(2, Direction::None));
        assert_eq!(log.last(), Some(status(2, Direction::None)));
        assert_eq!(log.len(), 5, "three moving statuses and two stops");
    }

    #[test]
    fn destination_requested_en_route_stops_the_lift_there() {
        let (mut lift, log) = lift_at(0);
        lift.move_to(Floor(5)).unwrap();
        lift.advance_by(FLOOR_INTERVAL).unwrap();
        lift.call(Floor(3)).unwrap();
        lift.run_until_idle().unwrap();

        assert_eq!(log.last(), Some(status(3, Direction::None)));
        assert_eq!(lift.queue().going_up(), &[Floor(5)], "farther floor waits for a new leg");

        lift.move_to(Floor(4)).unwrap();
        lift.run_until_idle().unwrap();
        assert_eq!(log.last(), Some(status(4, Direction::None)));
        assert_eq!(lift.queue().going_up(), &[Floor(5)]);
    }

    #[test]
    fn opposite_request_while_moving_waits_in_queue() {
        let (mut lift, log) = lift_at(0);
        lift.move_to(Floor(3)).unwrap();
        lift.advance_by(FLOOR_INTERVAL).unwrap();
        lift.move_to(Floor(0)).unwrap();
        lift.run_until_idle().unwrap();
        assert_eq!(log.last(), Some(status(3, Direction::None)));
        assert_eq!(lift.queue().going_down(), &[Floor(0)]);

        // The next leg runs to the lowest queued floor but stops at the nearest.
        lift.move_to(Floor(2)).unwrap();
        lift.run_until_idle().unwrap();
        assert_eq!(log.last(), Some(status(2, Direction::None)));
        assert_eq!(lift.queue().going_down(), &[Floor(0)]);
    }

    #[test]
    fn forged_arrival_is_refused() {
        let (mut lift, log) = lift_at(0);
        let event = LiftEvent::EngineArrivalUp(Floor(1));
        assert_eq!(lift.submit(event), Err(ControlError::ForeignArrival(event)));
        assert!(log.is_empty());
        assert!(lift.submit(LiftEvent::MoveRequest(Floor(1))).is_ok());
    }

    #[test]
    fn advancing_by_the_longest_duration_saturates() {
        let (mut lift, log) = lift_at(0);
        lift.move_to(Floor(1)).unwrap();
        lift.advance_by(Duration::from_millis(1)).unwrap();
        lift.advance_by(Duration::MAX).unwrap();
        assert_eq!(lift.now(), Tick(u64::MAX));
        assert_eq!(log.last(), Some(status(1, Direction::None)));
    }

    #[test]
    fn oversized_interval_fails_to_build() {
        let config = LiftConfig { floor_interval_ms: u64::MAX / 2 + 1, ..LiftConfig::default() };
        let result = LiftBuilder::new(VirtualScheduler::new()).config(config).build();
        assert!(matches!(result, Err(ControlError::Lift(LiftError::Config(_)))));
    }

    #[test]
    fn failed_arrival_still_advances_the_clock() {
        let (mut lift, log) = lift_at(0);
        lift.move_to(Floor(3)).unwrap();
        let (tx, rx) = crossbeam_channel::unbounded::<LiftEvent>();
        drop(rx);
        lift.engine.register(tx);

        assert_eq!(
            lift.advance_by(FLOOR_INTERVAL * 5),
            Err(ControlError::Engine(EngineError::ConsumerDisconnected))
        );
        assert_eq!(lift.now(), Tick(5_000));
        assert_eq!(log.len(), 1, "only the departure status");
    }

    #[test]
    fn invalid_config_fails_to_build() {
        let config = LiftConfig { starting_floor: 40, ..LiftConfig::default() };
        let result = LiftBuilder::new(VirtualScheduler::new()).config(config).build();
        assert!(matches!(result, Err(ControlError::Lift(LiftError::Config(_)))));
    }
}

// ── StatusPublisher ───────────────────────────────────────────────────────────

#[cfg(test)]
mod publisher {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Appends `(tag, floor)` to a shared journal to observe delivery order.
    struct Tagged(&'static str, Arc<Mutex<Vec<(&'static str, i32)>>>);

    impl StatusObserver for Tagged {
        fn on_status(&mut self, status: LiftStatus) {
            self.1.lock().unwrap().push((self.0, status.current_floor.0));
        }
    }

    #[test]
    fn delivers_in_subscription_order() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let mut p = StatusPublisher::new();
        p.subscribe(Box::new(Tagged("a", Arc::clone(&journal))));
        p.subscribe(Box::new(Tagged("b", Arc::clone(&journal))));
        p.publish(status(1, Direction::Up));
        p.publish(status(2, Direction::None));
        assert_eq!(*journal.lock().unwrap(), vec![("a", 1), ("b", 1), ("a", 2), ("b", 2)]);
    }

    #[test]
    fn unsubscribed_observer_receives_nothing() {
        let log = StatusLog::new();
        let mut p = StatusPublisher::new();
        let id = p.subscribe(Box::new(log.clone()));
        assert!(p.unsubscribe(id));
        assert!(!p.unsubscribe(id), "handle is spent");
        p.publish(status(1, Direction::Up));
        assert!(log.is_empty());
        assert!(p.is_empty());
    }

    #[test]
    fn completion_is_delivered_once_and_ends_the_stream() {
        let log = StatusLog::new();
        let mut p = StatusPublisher::new();
        p.subscribe(Box::new(log.clone()));
        p.complete();
        p.complete();
        p.publish(status(1, Direction::Up));
        assert_eq!(log.completions(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn late_subscriber_is_completed_immediately() {
        let log = StatusLog::new();
        let mut p = StatusPublisher::new();
        p.complete();
        p.subscribe(Box::new(log.clone()));
        assert_eq!(log.completions(), 1);
        assert!(p.is_empty());
    }

    #[test]
    fn noop_observer_does_not_disturb_others() {
        let log = StatusLog::new();
        let mut p = StatusPublisher::new();
        p.subscribe(Box::new(crate::NoopObserver));
        p.subscribe(Box::new(log.clone()));
        p.publish(status(0, Direction::None));
        p.complete();
        assert_eq!(p.len(), 2);
        assert_eq!(log.statuses(), vec![status(0, Direction::None)]);
        assert_eq!(log.completions(), 1);
    }

    #[test]
    fn dropping_the_lift_completes_subscribers() {
        let (mut lift, log) = lift_at(0);
        lift.move_to(Floor(3)).unwrap();
        drop(lift);
        assert_eq!(log.completions(), 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn dispose_is_idempotent() {
        let (mut lift, log) = lift_at(0);
        lift.dispose();
        lift.dispose();
        drop(lift);
        assert_eq!(log.completions(), 1);
    }

    #[test]
    fn channel_observer_forwards_statuses() {
        let (tx, rx) = crossbeam_channel::unbounded::<LiftStatus>();
        let mut p = StatusPublisher::new();
        p.subscribe(Box::new(tx));
        p.publish(status(4, Direction::Down));
        assert_eq!(rx.try_recv().unwrap(), status(4, Direction::Down));
        drop(rx);
        p.publish(status(3, Direction::Down));
    }
}

// ── Lift on wall-clock time ───────────────────────────────────────────────────

#[cfg(test)]
mod wall_clock {
    use lift_schedule::ThreadScheduler;

    use super::*;

    #[test]
    fn serve_finishes_the_leg_after_requests_close() {
        let log = StatusLog::new();
        let config = LiftConfig {
            bottom_floor:      0,
            top_floor:         5,
            starting_floor:    0,
            floor_interval_ms: 10,
        };
        let mut lift = LiftBuilder::new(ThreadScheduler::new())
            .config(config)
            .observer(Box::new(log.clone()))
            .build()
            .unwrap();

        let (tx, rx) = crossbeam_channel::unbounded();
        tx.send(LiftEvent::Call(Floor(9))).unwrap(); // refused: out of range
        tx.send(LiftEvent::MoveRequest(Floor(2))).unwrap();
        drop(tx);

        lift.serve(&rx).unwrap();
        assert_eq!(
            log.statuses(),
            vec![status(0, Direction::Up), status(1, Direction::Up), status(2, Direction::None)]
        );
        assert_eq!(log.completions(), 1);
    }
}
