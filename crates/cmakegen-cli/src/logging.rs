//! Tracing subscriber setup for the `cmakegen` binary.
//!
//! The library crates only emit spans and events; this is the one place a
//! subscriber is installed. Events go to stderr so `--output-format json`
//! keeps stdout parseable.
//!
//! `-q` selects ERROR, no flag WARN, and each `-v` raises the level one step
//! up to TRACE. `RUST_LOG`, when set, replaces the computed filter.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Crates whose events are shown at the computed level.
const WORKSPACE_TARGETS: [&str; 3] = ["cmakegen", "cmakegen_core", "cmakegen_adapters"];

/// Install the global subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = level_for(args);
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::new(workspace_directives(level)),
    };

    // Module targets only help once debugging output is on.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(level >= LevelFilter::DEBUG)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn workspace_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_ascii_lowercase();
    WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn verbosity_maps_to_levels() {
        let cases = [
            (0, false, LevelFilter::WARN),
            (1, false, LevelFilter::INFO),
            (2, false, LevelFilter::DEBUG),
            (3, false, LevelFilter::TRACE),
            (9, false, LevelFilter::TRACE),
            (0, true, LevelFilter::ERROR),
        ];
        for (verbose, quiet, expected) in cases {
            assert_eq!(level_for(&args(verbose, quiet)), expected, "-v x{verbose} quiet={quiet}");
        }
    }

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(level_for(&args(3, true)), LevelFilter::ERROR);
    }

    #[test]
    fn directives_cover_every_workspace_crate() {
        assert_eq!(
            workspace_directives(LevelFilter::DEBUG),
            "cmakegen=debug,cmakegen_core=debug,cmakegen_adapters=debug"
        );
    }
}
