//! The vcpkg registry pin file (`vcpkg-configuration.json`).

use serde::Serialize;

use crate::domain::value_objects::{RepoRef, Revision};

const GIT_KIND: &str = "git";

/// Top-level contents of `vcpkg-configuration.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryPin {
    #[serde(rename = "default-registry")]
    pub default_registry: DefaultRegistry,
    /// Always serialized, even when empty.
    pub registries: Vec<Registry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultRegistry {
    pub kind: String,
    pub baseline: Revision,
    pub repository: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registry {
    pub kind: String,
    pub baseline: Revision,
    pub repository: String,
    pub packages: Vec<String>,
}

impl RegistryPin {
    /// Pin the upstream vcpkg registry at `baseline`, with no extra registries.
    pub fn new(baseline: Revision) -> Self {
        Self {
            default_registry: DefaultRegistry {
                kind: GIT_KIND.into(),
                baseline,
                repository: RepoRef::vcpkg_registry().git_url(),
            },
            registries: Vec::new(),
        }
    }

    pub fn add_registry(&mut self, repo: &RepoRef, baseline: Revision, packages: Vec<String>) {
        self.registries.push(Registry {
            kind: GIT_KIND.into(),
            baseline,
            repository: repo.git_url(),
            packages,
        });
    }
}
