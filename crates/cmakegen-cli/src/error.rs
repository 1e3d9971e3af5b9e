//! CLI error type, its exit codes and its terminal rendering.
//!
//! Every failure a command can report ends up as a [`CliError`]. `main`
//! logs it, renders it with [`CliError::render`] and exits with
//! [`CliError::exit_code`].

use std::error::Error as _;
use std::fmt::Write as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use cmakegen_core::application::ApplicationError;
use cmakegen_core::error::{ErrorCategory as CoreCategory, GenError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Arguments that parse but do not describe a valid project.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generation, resolution or a build tool step failed.
    #[error("Generation failed: {0}")]
    Core(#[from] GenError),

    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

/// How a failure is reported and which exit code it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments, an existing project directory, a declined prompt.
    UserError,
    /// The registry was unreachable or answered with something unreadable.
    Remote,
    /// The configuration file or environment could not be used.
    Configuration,
    Internal,
}

impl ErrorCategory {
    fn exit_code(self) -> u8 {
        match self {
            Self::Internal => 1,
            Self::UserError => 2,
            Self::Remote => 3,
            Self::Configuration => 4,
        }
    }
}

impl CliError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::InvalidProjectName { .. } | Self::Cancelled => {
                ErrorCategory::UserError
            }
            Self::Config { .. } => ErrorCategory::Configuration,
            Self::Io { .. } => ErrorCategory::Internal,
            Self::Core(core) => classify_core(core.primary()),
        }
    }

    /// Exit code to pass to the OS: 2 user, 3 remote, 4 config, 1 internal.
    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    /// What the user can do about it.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(core) => core.suggestions(),
            Self::InvalidInput { .. } => {
                vec!["Run 'cmakegen new --help' for the accepted flags".into()]
            }
            Self::InvalidProjectName { .. } => vec![
                "The last path component becomes the CMake project name".into(),
                "Use letters, digits, '_' or '-', e.g. Demo, my_app, ../Game".into(),
            ],
            Self::Config { .. } => vec![
                "Check the file shown by 'cmakegen config path'".into(),
                "Run 'cmakegen init --force' to write a fresh default config".into(),
            ],
            Self::Io { .. } => vec!["Check permissions on the target directory".into()],
            Self::Cancelled => vec!["Nothing was written".into()],
        }
    }

    /// Multi-line report for stderr. `verbose` adds the cause chain;
    /// `color` adds ANSI styling.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if color { style(text) } else { text.to_owned() }
        };

        let mut out = String::new();
        let _ = writeln!(
            out,
            "\n{} {}",
            paint("\u{2717} Error:", |t| t.red().bold().to_string()),
            paint(&self.to_string(), |t| t.red().to_string()),
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let line = format!("  caused by: {err}");
                let _ = writeln!(out, "{}", paint(&line, |t| t.dimmed().to_string()));
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(
                out,
                "\n{}",
                paint("Suggestions:", |t| t.yellow().bold().to_string())
            );
            for suggestion in suggestions {
                let _ = writeln!(out, "  {suggestion}");
            }
        }

        if !verbose {
            let _ = writeln!(
                out,
                "\n{}",
                paint("Use -v / --verbose for more details.", |t| t.dimmed().to_string())
            );
        }
        out
    }

    /// Record the failure at a level matching its category.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!(error = %self, "command rejected"),
            category => tracing::error!(error = %self, ?category, "command failed"),
        }
        if let Some(source) = self.source() {
            tracing::debug!("caused by: {source}");
        }
    }
}

/// Existing projects, missing parents and invalid build specs are the
/// user's to fix. Registry trouble gets its own code so scripts can retry.
fn classify_core(primary: &GenError) -> ErrorCategory {
    if let GenError::Application(
        ApplicationError::ProjectExists { .. } | ApplicationError::MissingParent { .. },
    ) = primary
    {
        return ErrorCategory::UserError;
    }
    match primary.category() {
        CoreCategory::Configuration => ErrorCategory::UserError,
        CoreCategory::RemoteResolution | CoreCategory::Decode => ErrorCategory::Remote,
        CoreCategory::FileSystem | CoreCategory::Process | CoreCategory::Internal => {
            ErrorCategory::Internal
        }
    }
}

/// Attach a context message to a foreign error at the call-site.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::Io {
            message: f().into(),
            source,
        })
    }
}
