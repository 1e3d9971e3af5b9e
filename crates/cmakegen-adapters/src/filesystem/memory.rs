//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use cmakegen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::GenResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep a handle while the service owns
/// another. Writes to paths registered with [`fail_on`](Self::fail_on) fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    failing: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later write to `path` fail.
    pub fn fail_on(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.failing.insert(path.into());
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> GenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> GenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.failing.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Injected write failure".into(),
            }
            .into());
        }

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> GenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if !inner.directories.contains(path) {
            return Err(ApplicationError::RollbackFailed {
                path: path.to_path_buf(),
                reason: "No such directory".into(),
            }
            .into());
        }

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/p/a.txt"), "a").is_err());

        fs.create_dir_all(Path::new("/p")).unwrap();
        fs.write_file(Path::new("/p/a.txt"), "a").unwrap();
        assert_eq!(fs.read_file(Path::new("/p/a.txt")).as_deref(), Some("a"));
    }

    #[test]
    fn injected_failure_only_hits_its_path() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/p")).unwrap();
        fs.fail_on("/p/bad.txt");

        assert!(fs.write_file(Path::new("/p/bad.txt"), "x").is_err());
        assert!(fs.write_file(Path::new("/p/good.txt"), "x").is_ok());
    }

    #[test]
    fn remove_dir_all_drops_subtree_only() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/p/src")).unwrap();
        fs.create_dir_all(Path::new("/q")).unwrap();
        fs.write_file(Path::new("/p/src/main.cpp"), "").unwrap();

        fs.remove_dir_all(Path::new("/p")).unwrap();
        assert!(!fs.exists(Path::new("/p")));
        assert!(!fs.exists(Path::new("/p/src/main.cpp")));
        assert!(fs.exists(Path::new("/q")));
    }
}
