//! Flags accepted by every subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

/// Flattened into [`super::Cli`]; `global = true` lets them follow any
/// subcommand on the command line.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Raise log verbosity: `-v` info, `-vv` debug, `-vvv` trace.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        long_help = "Raise log verbosity. Logs go to stderr.\n  \
                     -v    resolved revisions and rollbacks\n  \
                     -vv   every emitted file and HTTP request\n  \
                     -vvv  everything"
    )]
    pub verbose: u8,

    /// Print errors only.
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable ANSI colours (also set by `NO_COLOR`).
    #[arg(long = "no-color", global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read configuration from FILE instead of the default locations.
    #[arg(short = 'c', long = "config", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How results are printed; `auto` picks human or plain from the TTY.
    #[arg(long = "output-format", global = true, value_enum, default_value = "auto")]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Auto,
    /// Coloured, with spinners and prompts.
    Human,
    /// No colour, no spinner.
    Plain,
    /// One JSON document on stdout.
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` config value. Unknown values mean `Auto`.
    pub fn from_config(value: &str) -> Self {
        Self::from_str(value.trim(), true).unwrap_or_default()
    }
}
