//! The engine-control surface used by the lift controller.

use lift_core::Floor;

use crate::EngineResult;

/// The only calls the controller makes outward to request timed movement.
///
/// [`FloorEventGenerator`][crate::FloorEventGenerator] is the production
/// implementation; controller tests substitute a recorder.
pub trait LiftEngine {
    /// Begin announcing upward arrivals from `from + 1` through `last_up_floor`.
    fn start_moving_upwards(&mut self, from: Floor, last_up_floor: Floor) -> EngineResult<()>;

    /// Begin announcing downward arrivals from `from - 1` through `last_down_floor`.
    fn start_moving_downwards(&mut self, from: Floor, last_down_floor: Floor) -> EngineResult<()>;

    /// Cancel the active leg, if any.  Idempotent.
    fn stop(&mut self);
}
