use serde::Serialize;

use crate::domain::value_objects::{RepoRef, Revision};

/// A repository fetched as source at build time, pinned to a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalProject {
    name: String,
    git_url: String,
    git_tag: Revision,
}

impl ExternalProject {
    pub fn new(repo: &RepoRef, git_tag: Revision) -> Self {
        Self {
            name: repo.repo().to_string(),
            git_url: repo.git_url(),
            git_tag,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn git_url(&self) -> &str {
        &self.git_url
    }

    pub fn git_tag(&self) -> &Revision {
        &self.git_tag
    }
}
