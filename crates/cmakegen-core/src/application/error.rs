//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the ports, not
//! in the build specification itself. Specification errors are
//! `DomainError` from `crate::domain`.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The remote registry was unreachable or answered unsuccessfully.
    #[error("Failed to resolve {repo}: {reason}")]
    RemoteResolution { repo: String, reason: String },

    /// A remote document arrived but could not be decoded.
    #[error("Failed to decode '{field}': {reason}")]
    Decode { field: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A bundled resource was requested that does not exist.
    #[error("Bundled resource '{id}' not found")]
    ResourceNotFound { id: String },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// The directory the project would be created in does not exist.
    #[error("Parent directory {path} does not exist")]
    MissingParent { path: PathBuf },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },

    /// The external build tool exited unsuccessfully.
    #[error("'{program}' exited with status {code}")]
    ProcessFailed { program: String, code: i32 },

    /// The external build tool could not be started.
    #[error("Failed to start '{program}': {reason}")]
    ProcessSpawnFailed { program: String, reason: String },

    /// The external build tool did not finish in time and was killed.
    #[error("'{program}' did not finish within {timeout:?}")]
    ProcessTimedOut { program: String, timeout: Duration },

    /// Shared state access failed (lock poisoned).
    #[error("Internal store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RemoteResolution { repo, .. } => vec![
                format!("Check that https://github.com/{} exists and is public", repo),
                "Check your network connection".into(),
                "Set GITHUB_TOKEN if you are hitting the API rate limit".into(),
            ],
            Self::Decode { field, .. } => vec![
                format!("The remote '{}' field is not in the expected format", field),
                "Check the repository's vcpkg.json".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ResourceNotFound { id } => vec![
                format!("No bundled resource named '{}'", id),
                "This is likely a packaging error".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
            ],
            Self::MissingParent { path } => vec![
                format!("Create {} first", path.display()),
                "Only the project directory itself is created".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![
                format!("Remove {} by hand", path.display()),
            ],
            Self::ProcessFailed { program, .. } => vec![
                format!("Run '{}' by hand in the project directory to see its output", program),
                "The generated files were kept".into(),
            ],
            Self::ProcessSpawnFailed { program, .. } => vec![
                format!("Check that '{}' is installed and on PATH", program),
                "The generated files were kept".into(),
            ],
            Self::ProcessTimedOut { .. } => vec![
                "Raise build.timeout_secs in the config file".into(),
                "The generated files were kept".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RemoteResolution { .. } => ErrorCategory::RemoteResolution,
            Self::Decode { .. } => ErrorCategory::Decode,
            Self::FilesystemError { .. }
            | Self::ResourceNotFound { .. }
            | Self::ProjectExists { .. }
            | Self::MissingParent { .. }
            | Self::RollbackFailed { .. } => ErrorCategory::FileSystem,
            Self::ProcessFailed { .. }
            | Self::ProcessSpawnFailed { .. }
            | Self::ProcessTimedOut { .. } => ErrorCategory::Process,
            Self::RenderingFailed { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
