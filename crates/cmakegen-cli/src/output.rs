//! Terminal output for command results.
//!
//! Results and progress go through [`OutputManager`] so that `--quiet`,
//! `--no-color` and `--output-format` are honoured in one place. Errors are
//! rendered by `main` from [`crate::error::CliError`].

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

const SPINNER_TICK: Duration = Duration::from_millis(80);

/// Kind of status line, which picks its symbol and colour.
#[derive(Debug, Clone, Copy)]
enum Status {
    Success,
    Warning,
    Info,
}

impl Status {
    fn symbol(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}", // ✓
            Self::Warning => "\u{26a0}", // ⚠
            Self::Info => "\u{2139}",    // ℹ
        }
    }

    fn paint(self, text: &str) -> String {
        match self {
            Self::Success => text.green().to_string(),
            Self::Warning => text.yellow().to_string(),
            Self::Info => text.blue().to_string(),
        }
    }
}

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    stdout: Term,
    stderr: Term,
}

impl OutputManager {
    /// The `--output-format` flag wins over `output.format`; `auto` becomes
    /// Human on a TTY and Plain otherwise. Colour is only used for Human.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        };
        let format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };

        Self {
            format,
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color && !config.output.no_color,
            stdout: Term::stdout(),
            stderr: Term::stderr(),
        }
    }

    /// Human messages are dropped in quiet mode and when stdout carries JSON.
    fn chatty(&self) -> bool {
        !self.quiet && self.format != OutputFormat::Json
    }

    fn status_line(&self, status: Status, msg: &str) -> String {
        if self.color {
            format!("{} {}", status.paint(status.symbol()).bold(), status.paint(msg))
        } else {
            format!("{} {msg}", status.symbol())
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        if !self.chatty() {
            return Ok(());
        }
        self.stdout.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        if !self.chatty() {
            return Ok(());
        }
        self.stdout.write_line(&self.status_line(Status::Success, msg))
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        if !self.chatty() {
            return Ok(());
        }
        self.stdout.write_line(&self.status_line(Status::Info, msg))
    }

    /// Warnings go to stderr and survive JSON mode.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stderr.write_line(&self.status_line(Status::Warning, msg))
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if !self.chatty() {
            return Ok(());
        }
        let line = if self.color {
            text.cyan().bold().to_string()
        } else {
            text.to_owned()
        };
        self.stdout.write_line(&line)
    }

    /// Pretty JSON document on stdout. Written in every mode except quiet.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.stdout.write_line(&text)
    }

    /// Spinner on stderr for a long step. Hidden unless output is Human.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet || self.format != OutputFormat::Human {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(SPINNER_TICK);
        pb
    }

    /// The resolved output format, never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.format
    }
}
