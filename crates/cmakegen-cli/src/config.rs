//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `CMAKEGEN_<SECTION>__<KEY>`, plus `GITHUB_TOKEN`
//!    as a fallback for `github.token`
//! 3. Config file: `--config FILE` if given, otherwise the platform config
//!    file and then `./cmakegen.toml`, both optional
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use cmakegen_adapters::github::DEFAULT_API_URL;
use cmakegen_core::application::services::DEFAULT_TIMEOUT;

/// File name of the per-directory config written by `init --local`.
pub const LOCAL_CONFIG_FILE: &str = "cmakegen.toml";

const ENV_PREFIX: &str = "CMAKEGEN";
const TOKEN_FALLBACK_VAR: &str = "GITHUB_TOKEN";
const REDACTED: &str = "********";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GitHub API access.
    pub github: GithubConfig,
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Post-generation build steps.
    pub build: BuildConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub description: String,
    /// License author used when `--license` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub test_project: bool,
    pub keep_on_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Run the CMake configure step after generation.
    pub generate: bool,
    /// Open the Visual Studio solution after configuring.
    pub open_ide: bool,
    pub timeout_secs: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            generate: false,
            open_ide: false,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, files and the environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// skipped when absent.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("failed to seed default configuration")?,
        );

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder
                .add_source(File::from(Self::config_path()).required(false))
                .add_source(File::from(Path::new(LOCAL_CONFIG_FILE)).required(false)),
        };

        let mut config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")?;

        if config.github.token.is_none() {
            config.github.token = std::env::var(TOKEN_FALLBACK_VAR)
                .ok()
                .filter(|token| !token.trim().is_empty());
        }
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `cmakegen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "cmakegen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// A copy that is safe to print.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.github.token.is_some() {
            config.github.token = Some(REDACTED.into());
        }
        config
    }

    /// Per-process timeout for build tool steps.
    pub fn build_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.build.timeout_secs)
    }
}
