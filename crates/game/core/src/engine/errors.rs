//! Error types for turn dispatch.

use crate::error::{ErrorSeverity, GameError};
use crate::types::EntityId;

/// Errors that can occur while starting or resuming the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("engine has already been started")]
    AlreadyStarted,

    #[error("engine has not been started")]
    NotStarted,

    #[error("engine is not locked")]
    NotLocked,

    #[error("no entities are currently scheduled")]
    NoActiveEntities,

    #[error("map hosts no human actor; dispatch would never pause")]
    NoHumanActor,

    #[error("scheduled entity {0} is not hosted by the map")]
    UnknownEntity(EntityId),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        use TurnError::*;
        match self {
            AlreadyStarted | NotStarted | NotLocked => ErrorSeverity::Recoverable,
            NoActiveEntities | NoHumanActor => ErrorSeverity::Validation,
            UnknownEntity(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use TurnError::*;
        match self {
            AlreadyStarted => "TURN_ALREADY_STARTED",
            NotStarted => "TURN_NOT_STARTED",
            NotLocked => "TURN_NOT_LOCKED",
            NoActiveEntities => "TURN_NO_ACTIVE_ENTITIES",
            NoHumanActor => "TURN_NO_HUMAN_ACTOR",
            UnknownEntity(_) => "TURN_UNKNOWN_ENTITY",
        }
    }
}
