//! Unified error handling for cmakegen core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for cmakegen core operations.
#[derive(Debug, Error, Clone)]
pub enum GenError {
    /// Errors from the domain layer (invalid build specification or manifest).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and I/O failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Generation failed and the partial project could not be removed.
    ///
    /// `cause` is the failure that triggered the rollback and is reported first.
    #[error("{cause} (rollback also failed: {reason})")]
    RollbackFailed { cause: Box<GenError>, reason: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl GenError {
    /// The error that started the failure chain.
    pub fn primary(&self) -> &GenError {
        match self {
            Self::RollbackFailed { cause, .. } => cause.primary(),
            other => other,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::RollbackFailed { cause, .. } => {
                let mut suggestions = cause.suggestions();
                suggestions.push("Remove the partially generated directory by hand".into());
                suggestions
            }
            Self::Internal { .. } => vec![
                "This appears to be a bug in cmakegen".into(),
                "Please report this issue with the output of -vvv".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::Decode => ErrorCategory::Decode,
            },
            Self::Application(e) => e.category(),
            Self::RollbackFailed { cause, .. } => cause.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.primary(),
            Self::Application(
                ApplicationError::RemoteResolution { .. } | ApplicationError::StoreLockError
            )
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The build specification is invalid.
    Configuration,
    /// The remote registry could not be reached or answered with an error.
    RemoteResolution,
    /// A remote document could not be decoded.
    Decode,
    /// Local file creation, copy, or rollback failed.
    FileSystem,
    /// The external build tool failed or timed out.
    Process,
    Internal,
}

/// Convenient result type alias.
pub type GenResult<T> = Result<T, GenError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> GenResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> GenResult<T> {
        self.map_err(|e| GenError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
