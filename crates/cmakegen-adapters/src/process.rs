//! Child process runner with a wall-clock timeout.

use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use cmakegen_core::{
    application::{ApplicationError, ProcessCommand, ports::ProcessRunner},
    error::GenResult,
};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs programs on the host, inheriting stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, command: &ProcessCommand, cwd: &Path, timeout: Duration) -> GenResult<i32> {
        let spawn_error = |e: std::io::Error| ApplicationError::ProcessSpawnFailed {
            program: command.program.clone(),
            reason: e.to_string(),
        };

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .spawn()
            .map_err(spawn_error)?;
        debug!(pid = child.id(), command = %command.display(), "Spawned");

        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait().map_err(spawn_error)? {
                // Killed by a signal: no code.
                return Ok(status.code().unwrap_or(-1));
            }
            if started.elapsed() >= timeout {
                warn!(command = %command.display(), ?timeout, "Timed out, killing");
                let _ = child.kill();
                let _ = child.wait();
                return Err(ApplicationError::ProcessTimedOut {
                    program: command.program.clone(),
                    timeout,
                }
                .into());
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use cmakegen_core::error::{ErrorCategory, GenError};

    fn sh(script: &str) -> ProcessCommand {
        ProcessCommand::new("sh").arg("-c").arg(script)
    }

    #[test]
    fn returns_exit_code() {
        let runner = SystemProcessRunner::new();
        let code = runner
            .run(&sh("exit 3"), Path::new("."), Duration::from_secs(5))
            .unwrap();
        assert_eq!(code, 3);
    }

    #[test]
    fn runs_in_given_directory() {
        let dir = tempfile::tempdir().unwrap();
        let runner = SystemProcessRunner::new();
        let code = runner
            .run(&sh("touch marker"), dir.path(), Duration::from_secs(5))
            .unwrap();

        assert_eq!(code, 0);
        assert!(dir.path().join("marker").exists());
    }

    #[test]
    fn kills_process_after_timeout() {
        let runner = SystemProcessRunner::new();
        let started = Instant::now();
        let err = runner
            .run(&sh("sleep 5"), Path::new("."), Duration::from_millis(200))
            .unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(4));
        assert!(matches!(
            err,
            GenError::Application(ApplicationError::ProcessTimedOut { .. })
        ));
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let runner = SystemProcessRunner::new();
        let err = runner
            .run(
                &ProcessCommand::new("cmakegen-no-such-program"),
                Path::new("."),
                Duration::from_secs(1),
            )
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Process);
        assert!(err.to_string().contains("cmakegen-no-such-program"));
    }
}
