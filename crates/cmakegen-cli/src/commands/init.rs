//! `cmakegen init`: create a default configuration file.

use std::path::PathBuf;

use tracing::info;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Commented header written above the serialized defaults.
const HEADER: &str = "\
# cmakegen configuration.
# Every key may be overridden with CMAKEGEN_<SECTION>__<KEY>, e.g.
# CMAKEGEN_GITHUB__TOKEN. GITHUB_TOKEN is used when github.token is unset.

";

/// Create a default configuration file.
pub fn execute(args: InitArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let config_path = target_path(&args, &global);

    // Bail early if the file already exists and --force was not given.
    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = render_default()?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&config_path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    info!(path = %config_path.display(), "Configuration written");
    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;

    Ok(())
}

/// `--config FILE` wins, then `--local`, then the platform location.
fn target_path(args: &InitArgs, global: &GlobalArgs) -> PathBuf {
    match (&global.config, args.local) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from(LOCAL_CONFIG_FILE),
        (None, false) => AppConfig::config_path(),
    }
}

fn render_default() -> CliResult<String> {
    let body = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::Config {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;
    Ok(format!("{HEADER}{body}"))
}
