//! Implementation of the `cmakegen new` command.
//!
//! Responsibility: translate CLI arguments and config into a `BuildSpec`,
//! wire the adapters into the core services, and display results. No
//! business logic lives here.

use std::path::{Path, PathBuf};

use chrono::Datelike as _;
use serde::Serialize;
use tracing::{debug, info, instrument};

use cmakegen_adapters::{
    EmbeddedResources, GithubResolver, GithubSettings, HandlebarsRenderer, LocalFilesystem,
    SystemProcessRunner,
};
use cmakegen_core::{
    application::{BuildToolService, GenerateOptions, GenerateService},
    domain::{BuildSpec, DomainValidator, LicenseType, ResourceSet},
};

use crate::{
    cli::{NewArgs, OutputFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Window-and-ImGui library the GUI starter sources are written against.
const GUI_FRAMEWORK: (&str, &str) = ("mwthinker", "CppSdl3");

/// Post-generation steps requested by flags or config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BuildSteps {
    configure: bool,
    open_ide: bool,
}

impl BuildSteps {
    fn from_args(args: &NewArgs, config: &AppConfig) -> Self {
        let open_ide = args.open_ide || config.build.open_ide;
        Self {
            // The solution only exists after a configure run.
            configure: args.generate || config.build.generate || open_ide,
            open_ide,
        }
    }
}

/// What will be generated, shown before confirming and for `--dry-run`.
#[derive(Debug, Serialize)]
struct Summary {
    project: String,
    location: PathBuf,
    sources: Vec<String>,
    dependencies: Vec<String>,
    link_libraries: Vec<String>,
    external_projects: Vec<String>,
    registries: Vec<String>,
    test_project: Option<String>,
    license: Option<String>,
}

impl Summary {
    fn of(spec: &BuildSpec) -> Self {
        Self {
            project: spec.project_name().to_string(),
            location: spec.project_dir().to_path_buf(),
            sources: spec.sources().iter().map(|s| s.to_slash()).collect(),
            dependencies: spec.vcpkg_dependencies().to_vec(),
            link_libraries: spec.link_libraries().to_vec(),
            external_projects: spec
                .external_projects()
                .iter()
                .map(ToString::to_string)
                .collect(),
            registries: spec
                .registries()
                .iter()
                .map(|r| format!("{} ({})", r.repo, r.packages.join(", ")))
                .collect(),
            test_project: spec.test_project_name(),
            license: spec
                .license()
                .map(|l| format!("{} ({})", l.kind, l.author)),
        }
    }
}

/// Execute the `cmakegen new` command.
///
/// Dispatch sequence:
/// 1. Validate the project name and build the `BuildSpec`
/// 2. Confirm with user unless `--yes`, `--quiet` or `--dry-run`
/// 3. Early-exit if `--dry-run`
/// 4. Generate via `GenerateService`
/// 5. Optionally configure with CMake and open the IDE
/// 6. Print the report or next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Spec
    validate_project_name(&args.name)?;
    let year = chrono::Local::now().year();
    let spec = build_spec(&args, &config, year)?;
    let steps = BuildSteps::from_args(&args, &config);
    let summary = Summary::of(&spec);

    debug!(
        sources = summary.sources.len(),
        externals = summary.external_projects.len(),
        registries = summary.registries.len(),
        "Build spec assembled"
    );

    // 2. Confirm
    let interactive = !global.quiet && output.format() != OutputFormat::Json;
    if interactive && !args.yes && !args.dry_run {
        show_summary(&summary, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 3. Dry run: describe but do not touch the network or the disk.
    if args.dry_run {
        if output.format() == OutputFormat::Json {
            output.json(&summary)?;
        } else {
            output.info(&format!(
                "Dry run: would create '{}' at {}",
                summary.project,
                summary.location.display(),
            ))?;
            show_summary(&summary, &output)?;
        }
        return Ok(());
    }

    // 4. Generate
    let service = GenerateService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(EmbeddedResources::new()),
        Box::new(HandlebarsRenderer::new()?),
        Box::new(GithubResolver::new(GithubSettings {
            api_url: config.github.api_url.clone(),
            token: config.github.token.clone(),
        })?),
    );
    let options = GenerateOptions {
        keep_on_error: args.keep_on_error || config.defaults.keep_on_error,
    };

    let project_dir = spec.project_dir().to_path_buf();
    let project_name = spec.project_name().to_string();
    info!(project = %project_name, path = %project_dir.display(), "Generation started");

    let spinner = output.spinner(&format!("Generating '{project_name}'..."));
    let result = service.build_files(spec, options);
    spinner.finish_and_clear();
    let report = result?;

    output.success(&format!(
        "Project '{}' created with {} files",
        project_name,
        report.files.len()
    ))?;

    // 5. Build tool steps. Failures here keep the generated files.
    if steps.configure {
        let tools = BuildToolService::new(Box::new(SystemProcessRunner::new()))
            .with_timeout(config.build_timeout());

        output.info("Running CMake configure...")?;
        tools.configure(&project_dir)?;
        if steps.open_ide {
            tools.open_ide(&project_dir, &project_name)?;
        }
    }

    // 6. Report
    if output.format() == OutputFormat::Json {
        output.json(&report)?;
    } else if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", project_dir.display()))?;
        if !steps.configure {
            output.print("  cmake --preset <windows|unix> -B build")?;
        }
        output.print("  cmake --build build")?;
    }

    Ok(())
}

// ── Spec construction ─────────────────────────────────────────────────────────

/// Reject names whose last component cannot name a CMake project.
fn validate_project_name(name: &str) -> CliResult<()> {
    let leaf = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: name.into(),
            reason: "cannot extract a project name from the path".into(),
        })?;

    DomainValidator::validate_project_name(leaf).map_err(|e| CliError::InvalidProjectName {
        name: name.into(),
        reason: e.to_string(),
    })?;
    if leaf.starts_with('.') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot start with '.'".into(),
        });
    }
    Ok(())
}

/// Merge flags over config defaults into a `BuildSpec`.
fn build_spec(args: &NewArgs, config: &AppConfig, year: i32) -> CliResult<BuildSpec> {
    let set = if args.gui {
        ResourceSet::Gui
    } else {
        ResourceSet::Console
    };

    let mut builder = BuildSpec::builder(&args.name)
        .with_resource_set(set)
        .with_description(
            args.description
                .clone()
                .unwrap_or_else(|| config.defaults.description.clone()),
        )
        .with_test_project(args.test || config.defaults.test_project);

    if args.sources.is_empty() {
        for source in EmbeddedResources::starter_sources(set) {
            builder = builder.add_source(source);
        }
    } else {
        for source in &args.sources {
            builder = builder.add_source(source);
        }
    }

    for dep in &args.dependencies {
        builder = builder.add_vcpkg_dependency(dep);
    }
    for lib in &args.link_libraries {
        builder = builder.add_link_library(lib);
    }

    if args.gui {
        let (owner, repo) = GUI_FRAMEWORK;
        builder = builder.add_external_project_with_dependencies(owner, repo);
    }
    for external in &args.externals {
        builder = builder.add_external_project_with_dependencies(&external.owner, &external.repo);
    }
    for registry in &args.registries {
        builder = builder.add_registry(
            &registry.repo.owner,
            &registry.repo.repo,
            registry.packages.iter().cloned(),
        );
    }

    if let Some(author) = args.license.as_ref().or(config.defaults.author.as_ref()) {
        builder = builder
            .with_license(LicenseType::Mit, author)
            .with_license_year(year);
    }

    let spec = builder.build().map_err(|e| CliError::InvalidInput {
        message: e.to_string(),
    })?;
    spec.validate().map_err(|e| CliError::InvalidInput {
        message: e.to_string(),
    })?;
    Ok(spec)
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_summary(summary: &Summary, out: &OutputManager) -> CliResult<()> {
    let list = |items: &[String]| {
        if items.is_empty() {
            "-".to_string()
        } else {
            items.join(", ")
        }
    };

    out.header("Configuration")?;
    out.print(&format!("  Project:      {}", summary.project))?;
    out.print(&format!("  Location:     {}", summary.location.display()))?;
    out.print(&format!("  Sources:      {}", list(&summary.sources)))?;
    out.print(&format!("  Dependencies: {}", list(&summary.dependencies)))?;
    out.print(&format!("  Link:         {}", list(&summary.link_libraries)))?;
    out.print(&format!("  External:     {}", list(&summary.external_projects)))?;
    out.print(&format!("  Registries:   {}", list(&summary.registries)))?;
    if let Some(test) = &summary.test_project {
        out.print(&format!("  Tests:        {test}"))?;
    }
    if let Some(license) = &summary.license {
        out.print(&format!("  License:      {license}"))?;
    }
    out.print("")?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return confirm_line();
    }
    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(std::io::Error::other)
        .with_cli_context(|| "failed to read confirmation input")
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    confirm_line()
}

/// `[Y/n]` prompt on stdin. An empty answer means yes.
fn confirm_line() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn new_args(extra: &[&str]) -> NewArgs {
        let argv = ["cmakegen", "new"].iter().chain(extra).copied();
        match Cli::parse_from(argv).command {
            Commands::New(args) => args,
            _ => panic!("expected New command"),
        }
    }

    // ── validate_project_name ─────────────────────────────────────────────────

    #[test]
    fn plain_and_nested_names_are_valid() {
        for name in ["Demo", "my_app", "../Game", "out/Tool"] {
            assert!(validate_project_name(name).is_ok(), "failed for: {name}");
        }
    }

    #[test]
    fn unusable_names_are_invalid() {
        for name in ["", ".", "..", ".hidden", "out/.."] {
            assert!(
                matches!(
                    validate_project_name(name),
                    Err(CliError::InvalidProjectName { .. })
                ),
                "accepted: {name}"
            );
        }
    }

    // ── build_spec ────────────────────────────────────────────────────────────

    #[test]
    fn console_defaults_to_starter_main() {
        let spec = build_spec(&new_args(&["Demo"]), &AppConfig::default(), 2024).unwrap();

        assert_eq!(spec.project_name(), "Demo");
        assert_eq!(Summary::of(&spec).sources, ["src/main.cpp"]);
        assert!(spec.external_projects().is_empty());
        assert!(spec.license().is_none());
        assert_eq!(spec.resource_set(), ResourceSet::Console);
    }

    #[test]
    fn gui_pulls_starter_sources_and_framework() {
        let spec =
            build_spec(&new_args(&["Viewer", "--gui"]), &AppConfig::default(), 2024).unwrap();

        assert_eq!(spec.resource_set(), ResourceSet::Gui);
        assert_eq!(
            Summary::of(&spec).sources,
            ["src/main.cpp", "src/testwindow.h", "src/testwindow.cpp"]
        );
        assert_eq!(spec.external_projects()[0].to_string(), "mwthinker/CppSdl3");
    }

    #[test]
    fn flags_map_onto_the_spec() {
        let args = new_args(&[
            "Demo",
            "-s",
            "src/app.cpp",
            "--dep",
            "fmt",
            "--link",
            "fmt::fmt",
            "--external",
            "acme/lib",
            "--registry",
            "acme/registry:core",
            "--test",
            "--license",
            "Jane Doe",
        ]);
        let spec = build_spec(&args, &AppConfig::default(), 2024).unwrap();

        assert_eq!(Summary::of(&spec).sources, ["src/app.cpp"]);
        assert_eq!(spec.vcpkg_dependencies(), ["fmt"]);
        assert_eq!(spec.link_libraries(), ["fmt::fmt"]);
        assert_eq!(spec.external_projects()[0].to_string(), "acme/lib");
        assert_eq!(spec.registries()[0].packages, ["core"]);
        assert_eq!(spec.test_project_name().as_deref(), Some("Demo_Test"));

        let license = spec.license().unwrap();
        assert_eq!(license.author, "Jane Doe");
        assert_eq!(license.year, Some(2024));
    }

    #[test]
    fn config_defaults_fill_missing_flags() {
        let mut config = AppConfig::default();
        config.defaults.description = "From config".into();
        config.defaults.author = Some("Config Author".into());
        config.defaults.test_project = true;

        let spec = build_spec(&new_args(&["Demo"]), &config, 2024).unwrap();
        assert_eq!(spec.description(), "From config");
        assert_eq!(spec.license().unwrap().author, "Config Author");
        assert!(spec.test_project_name().is_some());

        let spec = build_spec(
            &new_args(&["Demo", "--description", "From flag", "--license", "Flag"]),
            &config,
            2024,
        )
        .unwrap();
        assert_eq!(spec.description(), "From flag");
        assert_eq!(spec.license().unwrap().author, "Flag");
    }

    #[test]
    fn absolute_source_is_invalid_input() {
        let err = build_spec(
            &new_args(&["Demo", "--source", "/etc/passwd"]),
            &AppConfig::default(),
            2024,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn open_ide_implies_configure() {
        let steps = BuildSteps::from_args(&new_args(&["Demo", "--open-ide"]), &AppConfig::default());
        assert_eq!(
            steps,
            BuildSteps {
                configure: true,
                open_ide: true
            }
        );

        let steps = BuildSteps::from_args(&new_args(&["Demo"]), &AppConfig::default());
        assert!(!steps.configure && !steps.open_ide);
    }
}
