//! Domain value objects: RepoRef, Revision, LicenseType, ResourceSet, TemplateId.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Each
//! defines its string representation and, where the CLI needs it, a
//! `FromStr` parser. Validation happens at construction so that a value,
//! once it exists, is well formed.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── RepoRef ───────────────────────────────────────────────────────────────────

/// A GitHub repository reference, `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    owner: String,
    repo: String,
}

impl RepoRef {
    /// Validate and build a repository reference.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Result<Self, DomainError> {
        let owner = owner.into();
        let repo = repo.into();
        let display = format!("{owner}/{repo}");

        for (part, what) in [(&owner, "owner"), (&repo, "repository name")] {
            if part.trim().is_empty() {
                return Err(DomainError::InvalidRepository {
                    value: display,
                    reason: format!("{what} is empty"),
                });
            }
            if part.contains('/') || part.chars().any(char::is_whitespace) {
                return Err(DomainError::InvalidRepository {
                    value: display,
                    reason: format!("{what} contains '/' or whitespace"),
                });
            }
        }

        Ok(Self { owner, repo })
    }

    /// The canonical upstream vcpkg registry.
    pub fn vcpkg_registry() -> Self {
        Self {
            owner: "microsoft".into(),
            repo: "vcpkg".into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// HTTPS clone URL, as written into generated files.
    pub fn git_url(&self) -> String {
        format!("https://github.com/{}/{}.git", self.owner, self.repo)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoRef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, repo)) => Self::new(owner, repo),
            None => Err(DomainError::InvalidRepository {
                value: s.to_string(),
                reason: "expected owner/repo".into(),
            }),
        }
    }
}

// ── Revision ──────────────────────────────────────────────────────────────────

/// An immutable commit identifier used to pin a dependency or registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    pub fn new(sha: impl Into<String>) -> Result<Self, DomainError> {
        let sha = sha.into();
        if sha.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "revision" });
        }
        Ok(Self(sha))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── LicenseType ───────────────────────────────────────────────────────────────

/// License families a LICENSE file can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LicenseType {
    #[default]
    Mit,
}

impl LicenseType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mit => "MIT",
        }
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LicenseType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mit" => Ok(Self::Mit),
            other => Err(DomainError::UnknownLicense {
                value: other.to_string(),
            }),
        }
    }
}

// ── ResourceSet ───────────────────────────────────────────────────────────────

/// Which bundled starter-source variants to copy.
///
/// A set overrides individual resources; anything it does not provide falls
/// back to the shared console resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceSet {
    #[default]
    Console,
    Gui,
}

impl ResourceSet {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Gui => "gui",
        }
    }
}

impl fmt::Display for ResourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TemplateId ────────────────────────────────────────────────────────────────

/// Identifies a template known to the rendering capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    /// Top-level `CMakeLists.txt`.
    BuildDescriptor,
    /// `CMakeLists.txt` of the `<Project>_Test` sub-project.
    TestBuildDescriptor,
    /// `.github/workflows/ci.yml`.
    Ci,
    License(LicenseType),
    /// `ExternalFetchContent.cmake`.
    ExternalFetchContent,
}

impl TemplateId {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BuildDescriptor => "CMakeLists.txt",
            Self::TestBuildDescriptor => "Test_CMakeLists.txt",
            Self::Ci => "ci.yml",
            Self::License(LicenseType::Mit) => "LICENSE-MIT",
            Self::ExternalFetchContent => "ExternalFetchContent.cmake",
        }
    }

    /// Every template the generator may request.
    pub const ALL: [TemplateId; 5] = [
        Self::BuildDescriptor,
        Self::TestBuildDescriptor,
        Self::Ci,
        Self::License(LicenseType::Mit),
        Self::ExternalFetchContent,
    ];
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
