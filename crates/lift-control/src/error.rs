use lift_core::{Direction, LiftError, LiftEvent};
use lift_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlError {
    #[error("{operation} was requested, but its destination queue has no candidate floor")]
    EmptyQueue { operation: &'static str },

    #[error("{event} received while the lift is moving {direction}")]
    UnexpectedArrival {
        event:     LiftEvent,
        direction: Direction,
    },

    #[error("{0} can only be produced by the lift's own engine")]
    ForeignArrival(LiftEvent),

    #[error(transparent)]
    Lift(#[from] LiftError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

impl ControlError {
    /// `true` for errors caused by a bad external request (the request is
    /// refused and the lift carries on).  Everything else is a broken
    /// internal contract.
    pub fn is_rejected_request(&self) -> bool {
        matches!(
            self,
            ControlError::ForeignArrival(_) | ControlError::Lift(LiftError::FloorOutOfRange { .. })
        )
    }
}

pub type ControlResult<T> = Result<T, ControlError>;
