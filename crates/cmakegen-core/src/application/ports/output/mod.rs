//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `cmakegen-adapters` crate provides implementations.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{PackageManifest, RepoRef, ResourceSet, Revision, TemplateId};
use crate::error::{GenError, GenResult};

/// Port for filesystem operations.
///
/// Implemented by:
/// - `cmakegen_adapters::filesystem::LocalFilesystem` (production)
/// - `cmakegen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> GenResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> GenResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents, deepest entries first.
    fn remove_dir_all(&self, path: &Path) -> GenResult<()>;
}

/// Port for the static files bundled with the generator.
#[cfg_attr(test, mockall::automock)]
pub trait ResourceStore: Send + Sync {
    /// Content of the resource `id` as provided by `set`, or `None` if
    /// nothing is bundled under it.
    ///
    /// A set may override any resource; ids a set does not provide resolve
    /// to the shared variant.
    fn get(&self, set: ResourceSet, id: &str) -> Option<String>;
}

/// Port for template rendering.
///
/// Implementations must fail on a missing template and on any reference to
/// a key the context does not hold.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: TemplateId, context: &RenderContext) -> GenResult<String>;
}

/// Port for the remote source-hosting registry.
///
/// Implemented by `cmakegen_adapters::github::GithubResolver`.
#[cfg_attr(test, mockall::automock)]
pub trait DependencyResolver: Send + Sync {
    /// Latest commit on the default branch of `repo`.
    fn latest_commit(&self, repo: &RepoRef) -> GenResult<Revision>;

    /// The `vcpkg.json` of `repo` at `revision`.
    fn fetch_manifest(&self, repo: &RepoRef, revision: &Revision) -> GenResult<PackageManifest>;
}

/// Port for running an external program to completion.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    /// Run `command` in `cwd` and return its exit code.
    ///
    /// A process still running after `timeout` is killed and reported as
    /// `ApplicationError::ProcessTimedOut`.
    fn run(&self, command: &ProcessCommand, cwd: &Path, timeout: Duration) -> GenResult<i32>;
}

// ── Port payloads ─────────────────────────────────────────────────────────────

/// Program and arguments for [`ProcessRunner::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ProcessCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Shell-like rendering for logs.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Named values handed to a template.
///
/// Keys are kept sorted so the rendered context is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    values: Map<String, Value>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Serialize) -> GenResult<()> {
        let value = serde_json::to_value(value).map_err(|e| GenError::Internal {
            message: format!("render context value is not serializable: {e}"),
        })?;
        self.values.insert(key.into(), value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_context_holds_json_values() {
        let mut ctx = RenderContext::new();
        ctx.insert("projectName", "Demo").unwrap();
        ctx.insert("sources", ["src/main.cpp"]).unwrap();
        ctx.insert("testProjectName", Option::<String>::None).unwrap();

        assert_eq!(ctx.get("projectName"), Some(&json!("Demo")));
        assert_eq!(ctx.get("sources"), Some(&json!(["src/main.cpp"])));
        assert_eq!(ctx.get("testProjectName"), Some(&Value::Null));
    }

    #[test]
    fn process_command_display() {
        let cmd = ProcessCommand::new("cmake").arg("--preset").arg("unix");
        assert_eq!(cmd.display(), "cmake --preset unix");
    }
}
