//! Generate Service - main application orchestrator.
//!
//! This service coordinates one generation run:
//! 1. Validate the build spec (no I/O on failure)
//! 2. Resolve external projects and registries through the resolver port
//! 3. Emit every project file through a [`FileEmitter`]
//! 4. Roll back the target directory if anything after its creation fails

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError, FileEmitter,
        ports::{DependencyResolver, Filesystem, RenderContext, ResourceStore, TemplateRenderer},
    },
    domain::{
        BuildSpec, DomainValidator as validator, ExternalProject, RegistryPin, RelativePath,
        RepoRef, Revision, TemplateId, push_unique,
    },
    error::{GenError, GenResult},
};

const DATA_DIR: &str = "data";
const CI_PATH: &str = ".github/workflows/ci.yml";
const LICENSE_PATH: &str = "LICENSE";
const FETCH_CONTENT_PATH: &str = "ExternalFetchContent.cmake";
const MANIFEST_PATH: &str = "vcpkg.json";
const REGISTRY_PIN_PATH: &str = "vcpkg-configuration.json";
const BUILD_DESCRIPTOR_PATH: &str = "CMakeLists.txt";
const TEST_SOURCE_PATH: &str = "src/tests.cpp";
const TEST_SOURCE_RESOURCE: &str = "tests.cpp";

/// Bundled files copied verbatim: (resource id, destination).
const STATIC_FILES: [(&str, &str); 3] = [
    ("gitattributes", ".gitattributes"),
    ("gitignore", ".gitignore"),
    ("CMakePresets.json", "CMakePresets.json"),
];

/// Per-run switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Leave the partial project in place when generation fails.
    pub keep_on_error: bool,
}

/// Everything fetched from the remote registry for one spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub external_projects: Vec<ExternalProject>,
    /// Dependencies of the external projects, first occurrence wins.
    pub fetched_dependencies: Vec<String>,
    pub registry_pin: RegistryPin,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub project_dir: PathBuf,
    /// Emitted files relative to `project_dir`, in emission order.
    pub files: Vec<RelativePath>,
    pub external_projects: Vec<ExternalProject>,
    pub dependencies: Vec<String>,
    pub default_baseline: Revision,
}

/// Main generation service.
pub struct GenerateService {
    filesystem: Box<dyn Filesystem>,
    resources: Box<dyn ResourceStore>,
    renderer: Box<dyn TemplateRenderer>,
    resolver: Box<dyn DependencyResolver>,
}

impl GenerateService {
    /// Create a new generate service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let service = GenerateService::new(
    ///     Box::new(LocalFilesystem::new()),
    ///     Box::new(EmbeddedResources::new()),
    ///     Box::new(HandlebarsRenderer::new()?),
    ///     Box::new(GithubResolver::new(settings)?),
    /// );
    /// ```
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        resources: Box<dyn ResourceStore>,
        renderer: Box<dyn TemplateRenderer>,
        resolver: Box<dyn DependencyResolver>,
    ) -> Self {
        Self {
            filesystem,
            resources,
            renderer,
            resolver,
        }
    }

    /// Generate the project described by `spec`.
    ///
    /// Consumes the spec. On failure after the target directory was created,
    /// the directory is removed unless `options.keep_on_error` is set.
    #[instrument(
        skip_all,
        fields(
            project = %spec.project_name(),
            output_path = %spec.project_dir().display()
        )
    )]
    pub fn build_files(
        &self,
        spec: BuildSpec,
        options: GenerateOptions,
    ) -> GenResult<GenerationReport> {
        validator::validate_build_spec(&spec)?;

        let root = spec.project_dir();
        if self.filesystem.exists(root) {
            return Err(ApplicationError::ProjectExists {
                path: root.to_path_buf(),
            }
            .into());
        }

        // Only the project directory is created, so rolling it back leaves
        // the filesystem as it was.
        if let Some(parent) = root.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !self.filesystem.exists(parent) {
                return Err(ApplicationError::MissingParent {
                    path: parent.to_path_buf(),
                }
                .into());
            }
        }

        info!(sources = spec.sources().len(), "Generating project");
        self.filesystem.create_dir_all(root)?;

        match self.generate(&spec) {
            Ok(report) => {
                info!(files = report.files.len(), "Project generated");
                Ok(report)
            }
            Err(e) if options.keep_on_error => {
                warn!(error = %e, "Generation failed, keeping partial project");
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "Generation failed, attempting rollback");
                Err(self.rollback(root, e))
            }
        }
    }

    /// Resolve every remote reference of `spec`.
    ///
    /// Order: external projects, then custom registries, then the default
    /// vcpkg registry. The first failure aborts.
    #[instrument(skip_all, fields(project = %spec.project_name()))]
    pub fn resolve(&self, spec: &BuildSpec) -> GenResult<Resolution> {
        let mut external_projects = Vec::with_capacity(spec.external_projects().len());
        let mut fetched_dependencies = Vec::new();

        for repo in spec.external_projects() {
            let revision = self.resolver.latest_commit(repo)?;
            let manifest = self.resolver.fetch_manifest(repo, &revision)?;
            info!(
                repo = %repo,
                revision = %revision,
                dependencies = manifest.dependencies.len(),
                "Resolved external project"
            );

            for dep in manifest.dependencies {
                push_unique(&mut fetched_dependencies, dep);
            }
            external_projects.push(ExternalProject::new(repo, revision));
        }

        let mut registries = Vec::with_capacity(spec.registries().len());
        for request in spec.registries() {
            let revision = self.resolver.latest_commit(&request.repo)?;
            info!(repo = %request.repo, revision = %revision, "Resolved registry");
            registries.push((request, revision));
        }

        let default_registry = RepoRef::vcpkg_registry();
        let baseline = self.resolver.latest_commit(&default_registry)?;
        info!(baseline = %baseline, "Resolved default registry");

        let mut registry_pin = RegistryPin::new(baseline);
        for (request, revision) in registries {
            registry_pin.add_registry(&request.repo, revision, request.packages.clone());
        }

        Ok(Resolution {
            external_projects,
            fetched_dependencies,
            registry_pin,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Everything after the root directory exists.
    fn generate(&self, spec: &BuildSpec) -> GenResult<GenerationReport> {
        let root = spec.project_dir();
        self.filesystem.create_dir_all(&root.join(DATA_DIR))?;

        let resolution = self.resolve(spec)?;

        let mut emitter = FileEmitter::new(
            root,
            spec.resource_set(),
            self.filesystem.as_ref(),
            self.resources.as_ref(),
            self.renderer.as_ref(),
        );

        for source in spec.sources() {
            emitter.emit_source(source)?;
        }
        let first_extra = emitter.emitted().len();

        for (resource, dest) in STATIC_FILES {
            emitter.copy_static_resource(resource, &RelativePath::new(dest))?;
        }

        let mut ci = RenderContext::new();
        ci.insert("projectName", spec.project_name())?;
        ci.insert("testProjectName", spec.test_project_name())?;
        emitter.render_template(&ci, TemplateId::Ci, &RelativePath::new(CI_PATH))?;

        if let Some(license) = spec.license() {
            let mut ctx = RenderContext::new();
            ctx.insert("author", &license.author)?;
            ctx.insert("year", license.year)?;
            emitter.render_template(
                &ctx,
                TemplateId::License(license.kind),
                &RelativePath::new(LICENSE_PATH),
            )?;
        }

        let external_libraries = if resolution.external_projects.is_empty() {
            None
        } else {
            let mut ctx = RenderContext::new();
            ctx.insert("externalProjects", &resolution.external_projects)?;
            emitter.render_template(
                &ctx,
                TemplateId::ExternalFetchContent,
                &RelativePath::new(FETCH_CONTENT_PATH),
            )?;
            Some(
                resolution
                    .external_projects
                    .iter()
                    .map(|p| p.name().to_string())
                    .collect::<Vec<_>>(),
            )
        };

        let manifest = spec.package_manifest(resolution.fetched_dependencies.iter().cloned());
        emitter.serialize_manifest(&manifest, &RelativePath::new(MANIFEST_PATH))?;
        emitter.serialize_manifest(
            &resolution.registry_pin,
            &RelativePath::new(REGISTRY_PIN_PATH),
        )?;

        let extra_files: Vec<String> = emitter.emitted()[first_extra..]
            .iter()
            .map(RelativePath::to_slash)
            .collect();
        let sources: Vec<String> = spec.sources().iter().map(RelativePath::to_slash).collect();

        let mut ctx = RenderContext::new();
        ctx.insert("projectName", spec.project_name())?;
        ctx.insert("description", spec.description())?;
        ctx.insert("sources", &sources)?;
        ctx.insert("vcpkgDependencies", spec.vcpkg_dependencies())?;
        ctx.insert("linkLibraries", spec.link_libraries())?;
        ctx.insert("testProjectName", spec.test_project_name())?;
        ctx.insert("linkExternalLibraries", &external_libraries)?;
        ctx.insert("extraFiles", &extra_files)?;
        emitter.render_template(
            &ctx,
            TemplateId::BuildDescriptor,
            &RelativePath::new(BUILD_DESCRIPTOR_PATH),
        )?;

        if let Some(test_name) = spec.test_project_name() {
            let test_dir = RelativePath::try_new(&test_name)?;
            emitter.copy_static_resource(TEST_SOURCE_RESOURCE, &test_dir.join(TEST_SOURCE_PATH)?)?;

            let mut ctx = RenderContext::new();
            ctx.insert("projectName", &test_name)?;
            ctx.insert("mainProjectName", spec.project_name())?;
            ctx.insert("sources", [TEST_SOURCE_PATH])?;
            ctx.insert("extraFiles", [BUILD_DESCRIPTOR_PATH])?;
            emitter.render_template(
                &ctx,
                TemplateId::TestBuildDescriptor,
                &test_dir.join(BUILD_DESCRIPTOR_PATH)?,
            )?;
        }

        Ok(GenerationReport {
            project_dir: root.to_path_buf(),
            files: emitter.into_emitted(),
            external_projects: resolution.external_projects,
            dependencies: manifest.dependencies,
            default_baseline: resolution.registry_pin.default_registry.baseline,
        })
    }

    /// Remove the partial project. Returns the error to report.
    fn rollback(&self, root: &Path, cause: GenError) -> GenError {
        match self.filesystem.remove_dir_all(root) {
            Ok(()) => {
                info!("Rollback successful");
                cause
            }
            Err(e) => {
                warn!(
                    error = %e,
                    path = %root.display(),
                    "Rollback failed"
                );
                GenError::RollbackFailed {
                    cause: Box::new(cause),
                    reason: e.to_string(),
                }
            }
        }
    }
}
