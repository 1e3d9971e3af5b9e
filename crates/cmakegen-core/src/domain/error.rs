// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they are carried inside the root error, which is `Clone`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors (invalid build specification)
    // ========================================================================
    #[error("Must at least have one source file")]
    NoSources,

    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Invalid repository '{value}': {reason}")]
    InvalidRepository { value: String, reason: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Parent directory traversal not allowed: {path}")]
    ParentTraversalNotAllowed { path: String },

    #[error("Cannot derive a project name from '{path}'")]
    InvalidProjectDir { path: String },

    #[error("Unknown license '{value}'")]
    UnknownLicense { value: String },

    // ========================================================================
    // Decode Errors (malformed manifest content)
    // ========================================================================
    #[error("Invalid package manifest: {reason}")]
    InvalidManifest { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NoSources => vec![
                "Declare at least one source file".into(),
                "Example: --source src/main.cpp".into(),
            ],
            Self::InvalidRepository { value, .. } => vec![
                format!("'{}' is not a valid repository reference", value),
                "Use the form owner/repo, e.g. microsoft/vcpkg".into(),
            ],
            Self::AbsolutePathNotAllowed { path } | Self::ParentTraversalNotAllowed { path } => {
                vec![
                    format!("'{}' must stay inside the project directory", path),
                    "Use a relative path such as src/main.cpp".into(),
                ]
            }
            Self::InvalidProjectDir { path } => vec![
                format!("'{}' has no final directory name", path),
                "Pass a directory name such as MyProject".into(),
            ],
            Self::UnknownLicense { value } => vec![
                format!("'{}' is not a supported license", value),
                "Supported licenses: MIT".into(),
            ],
            Self::InvalidManifest { .. } => vec![
                "The remote vcpkg.json could not be parsed".into(),
                "Check that the repository has a valid vcpkg.json at its default branch".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidManifest { .. } => ErrorCategory::Decode,
            _ => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Decode,
}
