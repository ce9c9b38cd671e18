//! Errors surfaced by the orchestrator API.
//!
//! Per-actor decision failures never become errors: they are reported as
//! [`crate::ai::ActionOutcome`]s with `Failure` status. These variants cover
//! misuse of the registry itself.
use combat_core::{ActorId, CombatFault, ErrorSeverity};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("actor {0} is not in the roster")]
    UnknownActor(ActorId),

    #[error("actor {0} is already registered")]
    AlreadyRegistered(ActorId),

    #[error("actor {0} is not registered")]
    NotRegistered(ActorId),

    #[error("actor {0} is defeated")]
    Defeated(ActorId),
}

impl CombatFault for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownActor(_) | Self::AlreadyRegistered(_) | Self::NotRegistered(_) => {
                ErrorSeverity::Validation
            }
            Self::Defeated(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownActor(_) => "RUNTIME_UNKNOWN_ACTOR",
            Self::AlreadyRegistered(_) => "RUNTIME_ALREADY_REGISTERED",
            Self::NotRegistered(_) => "RUNTIME_NOT_REGISTERED",
            Self::Defeated(_) => "RUNTIME_DEFEATED",
        }
    }
}
