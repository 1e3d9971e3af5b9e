//! Post-generation build tool steps: CMake configure and IDE launch.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{ProcessCommand, ProcessRunner},
    },
    error::GenResult,
};

/// Wall-clock bound for each external process.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

const BUILD_DIR: &str = "build";

/// Host family, which selects the CMake preset and whether an IDE exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    /// Preset name defined in the bundled `CMakePresets.json`.
    pub const fn preset(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Unix => "unix",
        }
    }
}

/// Runs CMake and the IDE against a generated project.
pub struct BuildToolService {
    runner: Box<dyn ProcessRunner>,
    platform: Platform,
    timeout: Duration,
}

impl BuildToolService {
    pub fn new(runner: Box<dyn ProcessRunner>) -> Self {
        Self {
            runner,
            platform: Platform::current(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `cmake --preset <platform> -B build`, run in `project_dir`.
    ///
    /// The build directory is given relative to the working directory so a
    /// relative `project_dir` is not applied twice.
    #[instrument(skip_all, fields(project_dir = %project_dir.display()))]
    pub fn configure(&self, project_dir: &Path) -> GenResult<()> {
        let command = ProcessCommand::new("cmake")
            .arg("--preset")
            .arg(self.platform.preset())
            .arg("-B")
            .arg(BUILD_DIR);
        self.run(&command, project_dir)
    }

    /// Open the generated Visual Studio solution. Windows only; a no-op elsewhere.
    #[instrument(skip_all, fields(project_dir = %project_dir.display()))]
    pub fn open_ide(&self, project_dir: &Path, project_name: &str) -> GenResult<()> {
        if self.platform != Platform::Windows {
            debug!("IDE launch is only supported on Windows, skipping");
            return Ok(());
        }

        let command = ProcessCommand::new("cmd")
            .arg("/C")
            .arg("start")
            .arg("devenv")
            .arg(format!("{project_name}.sln"));
        self.run(&command, &project_dir.join(BUILD_DIR))
    }

    fn run(&self, command: &ProcessCommand, cwd: &Path) -> GenResult<()> {
        info!(command = %command.display(), "Running build tool");
        let code = self.runner.run(command, cwd, self.timeout)?;
        if code != 0 {
            return Err(ApplicationError::ProcessFailed {
                program: command.program.clone(),
                code,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::MockProcessRunner;
    use crate::error::{ErrorCategory, GenError};

    #[test]
    fn configure_uses_platform_preset_and_build_dir() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|cmd, cwd, timeout| {
                cmd.program == "cmake"
                    && cmd.args == ["--preset", "unix", "-B", "build"]
                    && cwd == Path::new("/work/Demo")
                    && *timeout == DEFAULT_TIMEOUT
            })
            .times(1)
            .returning(|_, _, _| Ok(0));

        let service = BuildToolService::new(Box::new(runner)).with_platform(Platform::Unix);
        service.configure(Path::new("/work/Demo")).unwrap();
    }

    #[test]
    fn relative_project_dir_builds_inside_the_project() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|cmd, cwd, _| {
                // The effective build directory is the working directory
                // joined with the `-B` value.
                cwd.join(&cmd.args[3]) == Path::new("Demo").join("build")
            })
            .times(1)
            .returning(|_, _, _| Ok(0));

        let service = BuildToolService::new(Box::new(runner)).with_platform(Platform::Unix);
        service.configure(Path::new("Demo")).unwrap();
    }

    #[test]
    fn non_zero_exit_is_a_process_error() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().returning(|_, _, _| Ok(1));

        let service = BuildToolService::new(Box::new(runner)).with_platform(Platform::Windows);
        let err = service.configure(Path::new("Demo")).unwrap_err();

        assert!(matches!(
            err,
            GenError::Application(ApplicationError::ProcessFailed { code: 1, .. })
        ));
        assert_eq!(err.category(), ErrorCategory::Process);
    }

    #[test]
    fn timeout_is_passed_through() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|_, _, timeout| *timeout == Duration::from_millis(10))
            .returning(|cmd, _, timeout| {
                Err(ApplicationError::ProcessTimedOut {
                    program: cmd.program.clone(),
                    timeout,
                }
                .into())
            });

        let service = BuildToolService::new(Box::new(runner))
            .with_platform(Platform::Unix)
            .with_timeout(Duration::from_millis(10));
        let err = service.configure(Path::new("Demo")).unwrap_err();
        assert!(err.to_string().contains("did not finish"));
    }

    #[test]
    fn open_ide_launches_solution_on_windows() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|cmd, cwd, _| {
                cmd.program == "cmd"
                    && cmd.args == ["/C", "start", "devenv", "Demo.sln"]
                    && cwd == Path::new("Demo").join("build")
            })
            .times(1)
            .returning(|_, _, _| Ok(0));

        let service = BuildToolService::new(Box::new(runner)).with_platform(Platform::Windows);
        service.open_ide(Path::new("Demo"), "Demo").unwrap();
    }

    #[test]
    fn open_ide_is_a_no_op_elsewhere() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().never();

        let service = BuildToolService::new(Box::new(runner)).with_platform(Platform::Unix);
        service.open_ide(Path::new("Demo"), "Demo").unwrap();
    }
}
