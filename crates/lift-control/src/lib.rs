//! `lift-control` — the lift's request queue, state machine, and runtime.
//!
//! # Event flow
//!
//! ```text
//! move_to / call ─▶ LiftController ─ enqueue ─▶ RequestQueue
//!                        │ idle? pick direction
//!                        ▼
//!                  LiftEngine::start_moving_{up,down}wards(from, last)
//!                        │ one timer per floor on the Scheduler
//!                        ▼
//!                  FloorEventGenerator ─ EngineArrival{Up,Down} ─▶ channel
//!                        │
//!                        ▼
//!                  LiftController ─ update floor, continue or stop
//!                        │
//!                        ▼
//!                  StatusPublisher ─▶ every StatusObserver, in order
//! ```
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`queue`]      | `RequestQueue` — up/down destinations, next/last queries |
//! | [`controller`] | `LiftController`, `LiftState`                            |
//! | [`observer`]   | `StatusObserver`, `NoopObserver`, `StatusLog`            |
//! | [`publisher`]  | `StatusPublisher`, `SubscriptionId`                      |
//! | [`lift`]       | `Lift<S>` — virtual-time and wall-clock runtimes         |
//! | [`builder`]    | `LiftBuilder<S>`                                         |
//! | [`error`]      | `ControlError`, `ControlResult<T>`                       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_control::{LiftBuilder, StatusLog};
//! use lift_core::Floor;
//! use lift_schedule::VirtualScheduler;
//!
//! let log = StatusLog::new();
//! let mut lift = LiftBuilder::new(VirtualScheduler::new())
//!     .observer(Box::new(log.clone()))
//!     .build()?;
//! lift.move_to(Floor(3))?;
//! lift.run_until_idle()?;
//! assert_eq!(log.last().unwrap().current_floor, Floor(3));
//! ```

pub mod builder;
pub mod controller;
pub mod error;
pub mod lift;
pub mod observer;
pub mod publisher;
pub mod queue;

#[cfg(test)]
mod tests;

pub use builder::LiftBuilder;
pub use controller::{LiftController, LiftState};
pub use error::{ControlError, ControlResult};
pub use lift::Lift;
pub use observer::{NoopObserver, StatusLog, StatusObserver};
pub use publisher::{StatusPublisher, SubscriptionId};
pub use queue::RequestQueue;
