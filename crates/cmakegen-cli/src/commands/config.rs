//! `cmakegen config`: inspect configuration values.

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised = toml::to_string_pretty(&config.redacted()).map_err(|e| {
                CliError::Config {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                }
            })?;
            output.print(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Look up a dotted key such as `build.timeout_secs`. Secrets are redacted.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let unknown = || CliError::Config {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    };

    let tree = serde_json::to_value(config.redacted()).map_err(|e| CliError::Config {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    let mut node = &tree;
    for part in key.split('.') {
        node = node.as_object().and_then(|o| o.get(part)).ok_or_else(unknown)?;
    }

    match node {
        Value::String(s) => Ok(s.clone()),
        Value::Object(_) => Err(unknown()),
        other => Ok(other.to_string()),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
