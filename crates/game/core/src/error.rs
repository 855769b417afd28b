//! Common error infrastructure for cavern-core.
//!
//! Domain-specific errors (e.g. `RepositoryError`, `MapError`) are defined in
//! their respective modules alongside the operations that raise them. This
//! module provides the shared classification trait they all implement.
//!
//! # Design Principles
//!
//! - **Configuration errors are fatal**: a missing template or an invalid
//!   config is a content bug and bubbles to the caller.
//! - **Gameplay outcomes are values**: blocked moves and out-of-range tile
//!   reads never produce an error.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: Temporary conditions that may succeed on retry
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating broken content or configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with the same or an alternative call.
    ///
    /// Examples: spawn point blocked, engine unlocked twice
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: map smaller than the screen, fill ratio out of range
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: schedule holds entities the map no longer hosts
    Internal,

    /// Fatal error - content is broken, cannot continue.
    ///
    /// Examples: missing template, no floor cell to spawn on
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

    /// Returns true if this error indicates a bug or broken content.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all cavern-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Keep `error_code` stable; clients match on it in logs
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
