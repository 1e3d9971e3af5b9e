//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use cmakegen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{GenError, GenResult},
};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> GenResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> GenResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// Deletes files before the directories that contain them.
    ///
    /// Best effort: entries that cannot be removed are skipped and the walk
    /// continues. The first failure is reported once everything else is gone.
    fn remove_dir_all(&self, path: &Path) -> GenResult<()> {
        remove_tree(path, |entry, is_dir| {
            if is_dir {
                std::fs::remove_dir(entry)
            } else {
                std::fs::remove_file(entry)
            }
        })
    }
}

fn remove_tree<F>(root: &Path, mut remove: F) -> GenResult<()>
where
    F: FnMut(&Path, bool) -> io::Result<()>,
{
    let mut failures: Vec<(PathBuf, String)> = Vec::new();

    for entry in WalkDir::new(root).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let at = e.path().unwrap_or(root).to_path_buf();
                failures.push((at, e.to_string()));
                continue;
            }
        };
        match remove(entry.path(), entry.file_type().is_dir()) {
            Ok(()) => debug!(path = %entry.path().display(), "Removed"),
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "Could not remove");
                failures.push((entry.path().to_path_buf(), e.to_string()));
            }
        }
    }

    let count = failures.len();
    match failures.into_iter().next() {
        None => Ok(()),
        Some((at, reason)) if count == 1 => Err(rollback_error(&at, reason)),
        Some((at, reason)) => Err(rollback_error(
            &at,
            format!("{reason} (and {} more entries left behind)", count - 1),
        )),
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> GenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn rollback_error(path: &Path, reason: String) -> GenError {
    ApplicationError::RollbackFailed {
        path: path.to_path_buf(),
        reason,
    }
    .into()
}
