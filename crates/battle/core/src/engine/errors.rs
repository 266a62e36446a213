//! Session errors.
//!
//! [`SetupError`] is fatal: the session is never created.
//! [`SubmitError`] is local: the submission is rejected, nothing is mutated,
//! and the caller re-prompts.

use crate::combat::TargetIssue;
use crate::error::{BattleError, ErrorSeverity};
use crate::state::{AbilityId, ItemId, StatusId, TemplateId};
use crate::stats::ResourceKind;

use super::phase::Phase;

/// Errors raised while assembling a session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("encounter has no living allies")]
    NoAllies,

    #[error("encounter has no enemies")]
    NoEnemies,

    #[error("too many allies: {0} (max {max})", max = crate::config::BattleConfig::MAX_ALLIES)]
    TooManyAllies(usize),

    #[error("too many enemies: {0} (max {max})", max = crate::config::BattleConfig::MAX_ENEMIES)]
    TooManyEnemies(usize),

    #[error("template '{0}' has invalid stats")]
    InvalidTemplate(TemplateId),

    #[error("template '{template}' references unknown ability '{ability}'")]
    UnknownAbility {
        template: TemplateId,
        ability: AbilityId,
    },

    #[error("unknown status '{0}'")]
    UnknownStatus(StatusId),

    #[error("no RNG seed configured")]
    MissingSeed,

    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

impl BattleError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use SetupError::*;
        match self {
            NoAllies => "SETUP_NO_ALLIES",
            NoEnemies => "SETUP_NO_ENEMIES",
            TooManyAllies(_) => "SETUP_TOO_MANY_ALLIES",
            TooManyEnemies(_) => "SETUP_TOO_MANY_ENEMIES",
            InvalidTemplate(_) => "SETUP_INVALID_TEMPLATE",
            UnknownAbility { .. } => "SETUP_UNKNOWN_ABILITY",
            UnknownStatus(_) => "SETUP_UNKNOWN_STATUS",
            MissingSeed => "SETUP_MISSING_SEED",
            InvalidConfig(_) => "SETUP_INVALID_CONFIG",
        }
    }
}

/// Errors raised by `submit_action`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("cannot submit an action during {0}")]
    InvalidPhase(Phase),

    #[error("no ally is waiting for input")]
    NotAwaitingInput,

    #[error("unknown ability '{0}'")]
    UnknownAbility(AbilityId),

    #[error("ability '{0}' is not in the actor's ability set")]
    AbilityNotKnown(AbilityId),

    #[error("invalid target: {0}")]
    InvalidTarget(#[from] TargetIssue),

    #[error("insufficient {resource}: need {needed}, have {available}")]
    InsufficientResource {
        resource: ResourceKind,
        needed: u32,
        available: u32,
    },

    #[error("item '{0}' is not available")]
    ItemUnavailable(ItemId),

    #[error("this encounter cannot be fled")]
    FleeForbidden,
}

impl BattleError for SubmitError {
    fn severity(&self) -> ErrorSeverity {
        use SubmitError::*;
        match self {
            InvalidPhase(_) | NotAwaitingInput => ErrorSeverity::Recoverable,
            UnknownAbility(_)
            | AbilityNotKnown(_)
            | InvalidTarget(_)
            | InsufficientResource { .. }
            | ItemUnavailable(_)
            | FleeForbidden => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use SubmitError::*;
        match self {
            InvalidPhase(_) => "SUBMIT_INVALID_PHASE",
            NotAwaitingInput => "SUBMIT_NOT_AWAITING_INPUT",
            UnknownAbility(_) => "SUBMIT_UNKNOWN_ABILITY",
            AbilityNotKnown(_) => "SUBMIT_ABILITY_NOT_KNOWN",
            InvalidTarget(_) => "SUBMIT_INVALID_TARGET",
            InsufficientResource { .. } => "SUBMIT_INSUFFICIENT_RESOURCE",
            ItemUnavailable(_) => "SUBMIT_ITEM_UNAVAILABLE",
            FleeForbidden => "SUBMIT_FLEE_FORBIDDEN",
        }
    }
}
