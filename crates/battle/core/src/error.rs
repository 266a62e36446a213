//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (`SetupError`, `SubmitError`) live next to the
//! session code that raises them. This module only holds the classification
//! shared by all of them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each failure surface has its own error enum
//! - **No Partial Mutation**: A returned error always means state is untouched
//! - **Severity Classification**: Errors are categorized for recovery strategies

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The caller should re-prompt and try another action
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: The session cannot be created or continued
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative action.
    ///
    /// Examples: not enough MP, item out of stock
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown ability, defeated target
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - the session must not be created.
    ///
    /// Examples: empty roster, missing RNG seed
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug or unusable state.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable identifiers for logs and tests
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
