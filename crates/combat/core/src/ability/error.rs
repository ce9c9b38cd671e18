//! Catalog lookup and action precondition errors.

use super::AbilityId;
use crate::status::StatusKind;
use crate::error::{CombatFault, ErrorSeverity};

/// Catalog and effect-registry failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown ability '{0}'")]
    UnknownAbility(AbilityId),

    #[error("unknown effect '{0}'")]
    UnknownEffect(String),

    #[error("effect '{effect}' requires a status kind")]
    MissingStatus { effect: String },

    #[error("effect '{effect}' needs a positive duration for {status} or must be permanent")]
    InvalidDuration { effect: String, status: StatusKind },

    #[error("ability '{0}' is defined more than once")]
    DuplicateAbility(AbilityId),
}

impl CombatFault for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAbility(_) => "CATALOG_UNKNOWN_ABILITY",
            Self::UnknownEffect(_) => "CATALOG_UNKNOWN_EFFECT",
            Self::MissingStatus { .. } => "CATALOG_MISSING_STATUS",
            Self::InvalidDuration { .. } => "CATALOG_INVALID_DURATION",
            Self::DuplicateAbility(_) => "CATALOG_DUPLICATE_ABILITY",
        }
    }
}

/// Why an action could not be performed.
///
/// The display text is user facing; it is what a combat log shows for the
/// failed action.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("{actor} cannot act")]
    CannotAct { actor: String },

    #[error("{actor} cannot attack")]
    CannotAttack { actor: String },

    #[error("{actor} cannot cast")]
    CannotCast { actor: String },

    #[error("Not enough mana")]
    NotEnoughMana { required: f64, available: f64 },

    #[error("{actor} has no target")]
    NoTarget { actor: String },

    #[error("{target} is already defeated")]
    TargetDefeated { target: String },

    #[error("{actor} does not know {ability}")]
    NotKnown { actor: String, ability: AbilityId },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl CombatFault for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CannotAct { .. }
            | Self::CannotAttack { .. }
            | Self::CannotCast { .. }
            | Self::NotEnoughMana { .. }
            | Self::NoTarget { .. }
            | Self::TargetDefeated { .. } => ErrorSeverity::Recoverable,
            Self::NotKnown { .. } => ErrorSeverity::Validation,
            Self::Catalog(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CannotAct { .. } => "ACTION_CANNOT_ACT",
            Self::CannotAttack { .. } => "ACTION_CANNOT_ATTACK",
            Self::CannotCast { .. } => "ACTION_CANNOT_CAST",
            Self::NotEnoughMana { .. } => "ACTION_NOT_ENOUGH_MANA",
            Self::NoTarget { .. } => "ACTION_NO_TARGET",
            Self::TargetDefeated { .. } => "ACTION_TARGET_DEFEATED",
            Self::NotKnown { .. } => "ACTION_NOT_KNOWN",
            Self::Catalog(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        let err = ActionError::NotEnoughMana {
            required: 15.0,
            available: 3.0,
        };
        assert_eq!(err.to_string(), "Not enough mana");
        assert!(err.severity().is_recoverable());

        let err = ActionError::CannotCast {
            actor: "Shaman".into(),
        };
        assert_eq!(err.to_string(), "Shaman cannot cast");

        let err = ActionError::from(CatalogError::UnknownAbility("meteor".into()));
        assert_eq!(err.to_string(), "unknown ability 'meteor'");
        assert_eq!(err.error_code(), "CATALOG_UNKNOWN_ABILITY");
    }
}
