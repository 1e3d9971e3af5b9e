//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::fmt;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "cmakegen",
    bin_name = "cmakegen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate CMake + vcpkg C++ projects with pinned dependencies",
    long_about = "cmakegen writes a ready-to-build C++ project: CMakeLists.txt, \
                  vcpkg manifest and registry pins resolved against GitHub, \
                  CMake presets, CI workflow, and an optional GoogleTest project.",
    after_help = "EXAMPLES:\n\
        \x20 cmakegen new Demo\n\
        \x20 cmakegen new Game --gui --test --license \"Jane Doe\"\n\
        \x20 cmakegen new Tool --dep fmt --link fmt::fmt --external acme/lib\n\
        \x20 cmakegen completions bash > /usr/share/bash-completion/completions/cmakegen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new C++ project.
    #[command(
        visible_alias = "n",
        about = "Generate a new project",
        after_help = "EXAMPLES:\n\
            \x20 cmakegen new Demo --description \"A demo\" --yes\n\
            \x20 cmakegen new Demo --source src/main.cpp --source src/util.h\n\
            \x20 cmakegen new Demo --registry acme/registry:acme-core,acme-net\n\
            \x20 cmakegen new ../Demo --test --generate --open-ide"
    )]
    New(NewArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 cmakegen init           # platform config directory\n\
            \x20 cmakegen init --local   # ./cmakegen.toml"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cmakegen completions bash > ~/.local/share/bash-completion/completions/cmakegen\n\
            \x20 cmakegen completions zsh  > ~/.zfunc/_cmakegen\n\
            \x20 cmakegen completions fish > ~/.config/fish/completions/cmakegen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the active configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cmakegen config get github.api_url\n\
            \x20 cmakegen config list\n\
            \x20 cmakegen config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `cmakegen new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project directory. Its last component is the project name.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    /// Source file, relative to the project. Repeatable.
    #[arg(
        short = 's',
        long = "source",
        value_name = "PATH",
        help = "Source file to compile (default: the starter sources)"
    )]
    pub sources: Vec<String>,

    /// vcpkg port to depend on. Repeatable.
    #[arg(short = 'd', long = "dep", value_name = "PORT", help = "vcpkg dependency")]
    pub dependencies: Vec<String>,

    /// Library to link against. Repeatable.
    #[arg(short = 'L', long = "link", value_name = "LIB", help = "Link library")]
    pub link_libraries: Vec<String>,

    /// GitHub project fetched as source at its latest commit.
    #[arg(
        short = 'e',
        long = "external",
        value_name = "OWNER/REPO",
        value_parser = parse_repo,
        help = "External project fetched at its latest commit"
    )]
    pub externals: Vec<RepoArg>,

    /// Custom vcpkg registry and the packages it serves.
    #[arg(
        long = "registry",
        value_name = "OWNER/REPO:PKG,PKG",
        value_parser = parse_registry,
        help = "Custom vcpkg registry serving the listed packages"
    )]
    pub registries: Vec<RegistryArg>,

    /// Project description (default from config).
    #[arg(long = "description", value_name = "TEXT", help = "Project description")]
    pub description: Option<String>,

    /// Add a GoogleTest project next to the main one.
    #[arg(short = 't', long = "test", help = "Add a GoogleTest project")]
    pub test: bool,

    /// Write an MIT license for this author.
    #[arg(long = "license", value_name = "AUTHOR", help = "Add an MIT license")]
    pub license: Option<String>,

    /// Start from the SDL3/ImGui window starter instead of the console one.
    #[arg(long = "gui", help = "Use the GUI starter sources")]
    pub gui: bool,

    /// Keep the partial project when generation fails.
    #[arg(long = "keep-on-error", help = "Do not roll back on failure")]
    pub keep_on_error: bool,

    /// Run `cmake --preset` once the files are written.
    #[arg(short = 'g', long = "generate", help = "Run the CMake configure step")]
    pub generate: bool,

    /// Open the generated solution in Visual Studio (Windows only).
    #[arg(long = "open-ide", help = "Open the solution in Visual Studio")]
    pub open_ide: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Preview what would be created without touching the network or disk.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

/// `owner/repo` as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoArg {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// `owner/repo:pkg,pkg` as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryArg {
    pub repo: RepoArg,
    pub packages: Vec<String>,
}

fn parse_repo(value: &str) -> Result<RepoArg, String> {
    match value.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok(RepoArg {
                owner: owner.to_string(),
                repo: repo.to_string(),
            })
        }
        _ => Err(format!("expected OWNER/REPO, got '{value}'")),
    }
}

fn parse_registry(value: &str) -> Result<RegistryArg, String> {
    let (repo, packages) = value
        .split_once(':')
        .ok_or_else(|| format!("expected OWNER/REPO:PKG[,PKG...], got '{value}'"))?;

    let packages: Vec<String> = packages
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    if packages.is_empty() {
        return Err(format!("registry '{repo}' must list at least one package"));
    }

    Ok(RegistryArg {
        repo: parse_repo(repo)?,
        packages,
    })
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `cmakegen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `cmakegen.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `cmakegen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `cmakegen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `github.api_url`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_minimal_new_command() {
        let cli = Cli::parse_from(["cmakegen", "new", "Demo"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name, "Demo");
        assert!(args.sources.is_empty());
        assert!(!args.test && !args.gui && !args.generate);
    }

    #[test]
    fn parse_full_new_command() {
        let cli = Cli::parse_from([
            "cmakegen",
            "new",
            "Demo",
            "-s",
            "src/main.cpp",
            "--source",
            "src/util.h",
            "--dep",
            "fmt",
            "-L",
            "fmt::fmt",
            "--external",
            "acme/lib",
            "--registry",
            "acme/registry:core, net",
            "--test",
            "--license",
            "Jane Doe",
            "--yes",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };

        assert_eq!(args.sources, ["src/main.cpp", "src/util.h"]);
        assert_eq!(args.dependencies, ["fmt"]);
        assert_eq!(args.link_libraries, ["fmt::fmt"]);
        assert_eq!(args.externals[0].to_string(), "acme/lib");
        assert_eq!(args.registries[0].repo.to_string(), "acme/registry");
        assert_eq!(args.registries[0].packages, ["core", "net"]);
        assert_eq!(args.license.as_deref(), Some("Jane Doe"));
        assert!(args.test && args.yes);
    }

    #[test]
    fn repo_argument_needs_owner_and_name() {
        assert!(parse_repo("acme/lib").is_ok());
        assert!(parse_repo("acme").is_err());
        assert!(parse_repo("/lib").is_err());
        assert!(parse_repo("acme/").is_err());
        assert!(parse_repo("a/b/c").is_err());
    }

    #[test]
    fn registry_argument_needs_packages() {
        assert!(parse_registry("acme/registry").is_err());
        assert!(parse_registry("acme/registry:").is_err());
        assert!(parse_registry("acme/registry: , ").is_err());
        assert_eq!(
            parse_registry("acme/registry:core").unwrap().packages,
            ["core"]
        );
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["cmakegen", "--quiet", "--verbose", "config", "path"]);
        assert!(result.is_err());
    }
}
