//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `LiftError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::{Floor, FloorRange};

/// Errors raised by core validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LiftError {
    #[error("floor {floor} is outside the served range {range}")]
    FloorOutOfRange { floor: Floor, range: FloorRange },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `lift-core`.
pub type LiftResult<T> = Result<T, LiftError>;
