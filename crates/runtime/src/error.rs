//! Unified error types surfaced by the runtime API.
use battle_core::{BattleError, ErrorSeverity, SetupError, SubmitError, TemplateId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("encounter setup failed: {0}")]
    Setup(#[from] SetupError),

    /// Even the defend fallback was rejected.
    #[error("action submission failed: {0}")]
    Submit(#[from] SubmitError),

    #[error("encounter exceeded {limit} rounds")]
    RoundLimit { limit: u32 },

    #[error("unknown combatant template '{0}'")]
    UnknownTemplate(TemplateId),

    #[error("party lists member '{0}' more than once")]
    DuplicateMember(TemplateId),

    #[error("party has no members")]
    EmptyParty,

    #[error("action provider failed: {0}")]
    Provider(String),

    #[error("session stopped before reaching a terminal phase")]
    Unfinished,
}

impl BattleError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Setup(e) => e.severity(),
            Self::Submit(e) => e.severity(),
            Self::Provider(_) => ErrorSeverity::Recoverable,
            Self::RoundLimit { .. }
            | Self::UnknownTemplate(_)
            | Self::DuplicateMember(_)
            | Self::EmptyParty => ErrorSeverity::Fatal,
            Self::Unfinished => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Setup(e) => e.error_code(),
            Self::Submit(e) => e.error_code(),
            Self::RoundLimit { .. } => "RUNTIME_ROUND_LIMIT",
            Self::UnknownTemplate(_) => "RUNTIME_UNKNOWN_TEMPLATE",
            Self::DuplicateMember(_) => "RUNTIME_DUPLICATE_MEMBER",
            Self::EmptyParty => "RUNTIME_EMPTY_PARTY",
            Self::Provider(_) => "RUNTIME_PROVIDER",
            Self::Unfinished => "RUNTIME_UNFINISHED",
        }
    }
}
