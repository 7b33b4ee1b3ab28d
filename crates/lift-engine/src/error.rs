use lift_core::{Direction, Floor};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("floor event generated before any lift registered as its consumer")]
    UninitializedConsumer,

    #[error("the registered lift stopped listening for floor events")]
    ConsumerDisconnected,

    #[error("cannot run a {direction} leg from {from} to {to}")]
    InvalidLeg {
        direction: Direction,
        from:      Floor,
        to:        Floor,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
