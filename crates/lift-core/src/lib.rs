//! `lift-core` — foundational types for the lift controller workspace.
//!
//! This crate is a dependency of every other `lift-*` crate.  It has no
//! `lift-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`floor`]     | `Floor`, `FloorRange`                                 |
//! | [`direction`] | `Direction` (`Up`, `Down`, `None`)                    |
//! | [`event`]     | `LiftEvent` (requests + engine arrivals), `LiftStatus`|
//! | [`time`]      | `Tick`, `LiftConfig`                                  |
//! | [`error`]     | `LiftError`, `LiftResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod direction;
pub mod error;
pub mod event;
pub mod floor;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::Direction;
pub use error::{LiftError, LiftResult};
pub use event::{LiftEvent, LiftStatus};
pub use floor::{Floor, FloorRange};
pub use time::{LiftConfig, MAX_FLOOR_INTERVAL_MS, Tick};
