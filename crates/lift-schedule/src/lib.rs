//! `lift-schedule` — the "schedule after duration D, cancellable" capability.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                  |
//! |-------------------|-----------------------------------------------------------|
//! | [`scheduler`]     | `Scheduler` trait, `TimerId`                              |
//! | [`virtual_clock`] | `VirtualScheduler` — manually advanced clock for tests    |
//! | [`realtime`]      | `ThreadScheduler` — wall-clock timers on a channel        |
//!
//! A scheduler only tracks *when* a timer is due.  What happens when it fires
//! is up to the owner (in practice the floor-event generator), which keeps a
//! `TimerId` per pending arrival and ignores fires it no longer recognises.

pub mod realtime;
pub mod scheduler;
pub mod virtual_clock;


pub use realtime::ThreadScheduler;
pub use scheduler::{Scheduler, TimerId};
pub use virtual_clock::VirtualScheduler;
