//! The `BuildSpec` aggregate and its fluent builder.
//!
//! A `BuildSpec` is everything the user declared about the project to
//! generate. It is assembled through [`BuildSpecBuilder`], frozen by
//! [`BuildSpecBuilder::build`], and consumed once by the generator.
//!
//! # Builder error handling
//!
//! Builder methods never fail on their own so that calls chain cleanly.
//! Malformed input (an absolute source path, a bad repository name) is
//! recorded and the first such error is returned from `build()`.
//! Cross-field requirements that only matter at generation time, such as
//! "at least one source", are checked by [`BuildSpec::validate`].

use std::path::{Path, PathBuf};

use crate::domain::{
    entities::common::{RelativePath, push_unique},
    entities::manifest::{PackageManifest, TEST_DEPENDENCY},
    error::DomainError,
    value_objects::{LicenseType, RepoRef, ResourceSet},
};

const DEFAULT_DESCRIPTION: &str = "Description";

// ── Supporting types ──────────────────────────────────────────────────────────

/// License file request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    pub kind: LicenseType,
    pub author: String,
    pub year: Option<i32>,
}

/// A custom vcpkg registry and the packages it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryRequest {
    pub repo: RepoRef,
    pub packages: Vec<String>,
}

// ── Aggregate root ────────────────────────────────────────────────────────────

/// Declarative description of a C++ project to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSpec {
    project_dir: PathBuf,
    project_name: String,
    sources: Vec<RelativePath>,
    link_libraries: Vec<String>,
    vcpkg_dependencies: Vec<String>,
    external_projects: Vec<RepoRef>,
    registries: Vec<RegistryRequest>,
    description: String,
    license: Option<License>,
    test_project: bool,
    resource_set: ResourceSet,
}

impl BuildSpec {
    /// Start a spec for a project generated into `project_dir`.
    ///
    /// The project name is the final component of the directory.
    pub fn builder(project_dir: impl Into<PathBuf>) -> BuildSpecBuilder {
        BuildSpecBuilder::new(project_dir.into())
    }

    /// Check the requirements generation depends on.
    ///
    /// Performs no I/O.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.project_name.is_empty() {
            return Err(DomainError::InvalidProjectDir {
                path: self.project_dir.display().to_string(),
            });
        }
        if self.sources.is_empty() {
            return Err(DomainError::NoSources);
        }
        Ok(())
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Name of the test sub-project, when one is requested.
    pub fn test_project_name(&self) -> Option<String> {
        self.test_project
            .then(|| format!("{}_Test", self.project_name))
    }

    pub fn sources(&self) -> &[RelativePath] {
        &self.sources
    }

    pub fn link_libraries(&self) -> &[String] {
        &self.link_libraries
    }

    pub fn vcpkg_dependencies(&self) -> &[String] {
        &self.vcpkg_dependencies
    }

    pub fn external_projects(&self) -> &[RepoRef] {
        &self.external_projects
    }

    pub fn registries(&self) -> &[RegistryRequest] {
        &self.registries
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn license(&self) -> Option<&License> {
        self.license.as_ref()
    }

    pub const fn has_test_project(&self) -> bool {
        self.test_project
    }

    pub const fn resource_set(&self) -> ResourceSet {
        self.resource_set
    }

    /// The package manifest written for this project.
    ///
    /// Dependencies are the explicit ones in declaration order followed by
    /// `fetched` in fetch order, first occurrence wins. The test framework
    /// is always last when a test project is requested, even if it was also
    /// declared or fetched.
    pub fn package_manifest<I>(&self, fetched: I) -> PackageManifest
    where
        I: IntoIterator<Item = String>,
    {
        let mut manifest =
            PackageManifest::new(self.project_name.to_lowercase(), self.description.clone());

        for dep in self.vcpkg_dependencies.iter().cloned().chain(fetched) {
            if self.test_project && dep == TEST_DEPENDENCY {
                continue;
            }
            push_unique(&mut manifest.dependencies, dep);
        }
        if self.test_project {
            push_unique(&mut manifest.dependencies, TEST_DEPENDENCY.to_string());
        }
        manifest
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`BuildSpec`].
#[derive(Debug, Clone)]
#[must_use = "a builder does nothing until `build()` is called"]
pub struct BuildSpecBuilder {
    spec: BuildSpec,
    errors: Vec<DomainError>,
}

impl BuildSpecBuilder {
    fn new(project_dir: PathBuf) -> Self {
        let project_name = project_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            spec: BuildSpec {
                project_dir,
                project_name,
                sources: Vec::new(),
                link_libraries: Vec::new(),
                vcpkg_dependencies: Vec::new(),
                external_projects: Vec::new(),
                registries: Vec::new(),
                description: DEFAULT_DESCRIPTION.into(),
                license: None,
                test_project: false,
                resource_set: ResourceSet::default(),
            },
            errors: Vec::new(),
        }
    }

    /// Declare a source file, relative to the project directory.
    pub fn add_source(mut self, path: impl Into<PathBuf>) -> Self {
        match RelativePath::try_new(path) {
            Ok(path) => {
                push_unique(&mut self.spec.sources, path);
            }
            Err(e) => self.errors.push(e),
        }
        self
    }

    pub fn add_vcpkg_dependency(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if name.trim().is_empty() {
            self.errors.push(DomainError::EmptyField {
                field: "vcpkg dependency",
            });
        } else {
            push_unique(&mut self.spec.vcpkg_dependencies, name);
        }
        self
    }

    pub fn add_link_library(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if name.trim().is_empty() {
            self.errors.push(DomainError::EmptyField {
                field: "link library",
            });
        } else {
            push_unique(&mut self.spec.link_libraries, name);
        }
        self
    }

    /// Fetch `owner/repo` as source at its latest commit and pull in the
    /// dependencies of its `vcpkg.json`.
    pub fn add_external_project_with_dependencies(
        mut self,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        match RepoRef::new(owner, repo) {
            Ok(repo) => {
                push_unique(&mut self.spec.external_projects, repo);
            }
            Err(e) => self.errors.push(e),
        }
        self
    }

    /// Pin a custom registry serving `packages`.
    ///
    /// Declaring the same repository twice merges the package lists.
    pub fn add_registry<I, S>(
        mut self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        packages: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let repo = match RepoRef::new(owner, repo) {
            Ok(repo) => repo,
            Err(e) => {
                self.errors.push(e);
                return self;
            }
        };

        let index = match self.spec.registries.iter().position(|r| r.repo == repo) {
            Some(index) => index,
            None => {
                self.spec.registries.push(RegistryRequest {
                    repo,
                    packages: Vec::new(),
                });
                self.spec.registries.len() - 1
            }
        };
        let entry = &mut self.spec.registries[index];
        for package in packages {
            push_unique(&mut entry.packages, package.into());
        }
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.spec.description = description.into();
        self
    }

    pub fn with_test_project(mut self, enabled: bool) -> Self {
        self.spec.test_project = enabled;
        self
    }

    /// Request a LICENSE file. A blank author means no license.
    pub fn with_license(mut self, kind: LicenseType, author: impl Into<String>) -> Self {
        let author = author.into();
        self.spec.license = if author.trim().is_empty() {
            None
        } else {
            let year = self.spec.license.as_ref().and_then(|l| l.year);
            Some(License { kind, author, year })
        };
        self
    }

    /// Copyright year for the license. Ignored without a license.
    pub fn with_license_year(mut self, year: i32) -> Self {
        if let Some(license) = self.spec.license.as_mut() {
            license.year = Some(year);
        }
        self
    }

    pub fn with_resource_set(mut self, set: ResourceSet) -> Self {
        self.spec.resource_set = set;
        self
    }

    /// Freeze the spec, reporting the first malformed input.
    pub fn build(self) -> Result<BuildSpec, DomainError> {
        match self.errors.into_iter().next() {
            Some(e) => Err(e),
            None => Ok(self.spec),
        }
    }
}
