//! `lift-engine` — the lift's motor, modelled as a stream of timed arrivals.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`engine`]    | `LiftEngine` — the start-up / start-down / stop control surface |
//! | [`generator`] | `FloorEventGenerator<S>` — paced, cancellable arrival legs      |
//! | [`error`]     | `EngineError`, `EngineResult<T>`                                |
//!
//! # Leg model
//!
//! 1. The controller calls `start_moving_upwards(from, last)` (or downwards).
//! 2. The generator schedules one timer for `from ± 1` on its [`Scheduler`].
//! 3. When that timer fires, the owner calls `fire(timer)`; the generator
//!    sends `EngineArrivalUp/Down(floor)` to its registered consumer and
//!    schedules the next floor, until `last` has been announced.
//! 4. `stop()` cancels the outstanding timer; nothing else is delivered for
//!    that leg.
//!
//! [`Scheduler`]: lift_schedule::Scheduler

pub mod engine;
pub mod error;
pub mod generator;


pub use engine::LiftEngine;
pub use error::{EngineError, EngineResult};
pub use generator::FloorEventGenerator;
