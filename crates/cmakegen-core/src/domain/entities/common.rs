use super::DomainError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A filesystem path guaranteed to stay inside the project directory.
///
/// Invariant: never absolute, never contains `..`, and holds no `.`
/// components, so equal paths compare equal. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if path is absolute or escapes its root (use `try_new` for fallible).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        match Self::try_new(path) {
            Ok(path) => path,
            Err(e) => panic!("RelativePath: {e}"),
        }
    }

    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if !path.components().any(|c| matches!(c, Component::Normal(_))) {
            return Err(DomainError::EmptyField { field: "path" });
        }
        if path.is_absolute() || path.has_root() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(DomainError::ParentTraversalNotAllowed {
                path: path.display().to_string(),
            });
        }
        Ok(Self(
            path.components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .collect(),
        ))
    }

    /// Join a segment, maintaining relative invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        Self::try_new(self.0.join(segment))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Forward-slash form, used in generated files on every platform.
    pub fn to_slash(&self) -> String {
        self.0
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Final path component, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|n| n.to_str())
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl TryFrom<&str> for RelativePath {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_slash())
    }
}

impl Serialize for RelativePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_slash())
    }
}

/// Push `value` unless an equal element is already present.
///
/// Keeps insertion order, which is what makes generated files readable and
/// byte-stable across runs. Returns `true` if the value was added.
pub fn push_unique<T: PartialEq>(items: &mut Vec<T>, value: T) -> bool {
    if items.contains(&value) {
        false
    } else {
        items.push(value);
        true
    }
}
