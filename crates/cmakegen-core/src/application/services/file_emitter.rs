//! File emission under a project root.
//!
//! Every emitted file goes through one write path, which creates the
//! parent directory, normalizes line endings to `\n`, and records the path.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, RenderContext, ResourceStore, TemplateRenderer},
    },
    domain::{RelativePath, ResourceSet, TemplateId},
    error::{GenError, GenResult},
};

/// Writes the generated files of one project.
pub struct FileEmitter<'a> {
    root: PathBuf,
    set: ResourceSet,
    filesystem: &'a dyn Filesystem,
    resources: &'a dyn ResourceStore,
    renderer: &'a dyn TemplateRenderer,
    emitted: Vec<RelativePath>,
}

impl<'a> FileEmitter<'a> {
    pub fn new(
        root: impl Into<PathBuf>,
        set: ResourceSet,
        filesystem: &'a dyn Filesystem,
        resources: &'a dyn ResourceStore,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self {
            root: root.into(),
            set,
            filesystem,
            resources,
            renderer,
            emitted: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths written so far, in emission order.
    pub fn emitted(&self) -> &[RelativePath] {
        &self.emitted
    }

    pub fn into_emitted(self) -> Vec<RelativePath> {
        self.emitted
    }

    /// Copy the bundled resource `resource_id` to `dest`.
    pub fn copy_static_resource(&mut self, resource_id: &str, dest: &RelativePath) -> GenResult<()> {
        let content = self.resources.get(self.set, resource_id).ok_or_else(|| {
            ApplicationError::ResourceNotFound {
                id: resource_id.to_string(),
            }
        })?;
        self.write(dest, &content)
    }

    /// Render `template` with `context` into `dest`.
    pub fn render_template(
        &mut self,
        context: &RenderContext,
        template: TemplateId,
        dest: &RelativePath,
    ) -> GenResult<()> {
        let content = self.renderer.render(template, context)?;
        self.write(dest, &content)
    }

    /// Write `value` to `dest` as pretty-printed JSON with a trailing newline.
    pub fn serialize_manifest<T: Serialize>(&mut self, value: &T, dest: &RelativePath) -> GenResult<()> {
        let mut json = serde_json::to_string_pretty(value).map_err(|e| GenError::Internal {
            message: format!("failed to serialize {dest}: {e}"),
        })?;
        json.push('\n');
        self.write(dest, &json)
    }

    /// Write an empty starter file.
    pub fn write_placeholder(&mut self, dest: &RelativePath) -> GenResult<()> {
        self.write(dest, "")
    }

    /// Emit a declared source: the bundled file of the same path when one
    /// exists, otherwise an empty placeholder.
    pub fn emit_source(&mut self, source: &RelativePath) -> GenResult<()> {
        match self.resources.get(self.set, &source.to_slash()) {
            Some(content) => self.write(source, &content),
            None => self.write_placeholder(source),
        }
    }

    fn write(&mut self, dest: &RelativePath, content: &str) -> GenResult<()> {
        let path = self.root.join(dest);
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }

        let content = if content.contains('\r') {
            content.replace("\r\n", "\n")
        } else {
            content.to_string()
        };
        self.filesystem.write_file(&path, &content)?;

        debug!(path = %dest, bytes = content.len(), "Emitted file");
        self.emitted.push(dest.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::{MockFilesystem, MockResourceStore, MockTemplateRenderer};

    fn filesystem_expecting(path: &'static str, content: &'static str) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(move |p, c| p == Path::new(path) && c == content)
            .times(1)
            .returning(|_, _| Ok(()));
        fs
    }

    #[test]
    fn serialize_manifest_is_pretty_with_trailing_newline() {
        let fs = filesystem_expecting("/p/x.json", "{\n  \"a\": 1\n}\n");
        let resources = MockResourceStore::new();
        let renderer = MockTemplateRenderer::new();
        let mut emitter = FileEmitter::new("/p", ResourceSet::Console, &fs, &resources, &renderer);

        emitter
            .serialize_manifest(&serde_json::json!({"a": 1}), &RelativePath::new("x.json"))
            .unwrap();
        assert_eq!(emitter.emitted(), [RelativePath::new("x.json")]);
    }

    #[test]
    fn rendered_output_uses_unix_line_endings() {
        let fs = filesystem_expecting("/p/LICENSE", "a\nb\n");
        let resources = MockResourceStore::new();
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .returning(|_, _| Ok("a\r\nb\r\n".to_string()));
        let mut emitter = FileEmitter::new("/p", ResourceSet::Console, &fs, &resources, &renderer);

        emitter
            .render_template(
                &RenderContext::new(),
                TemplateId::License(crate::domain::LicenseType::Mit),
                &RelativePath::new("LICENSE"),
            )
            .unwrap();
    }

    #[test]
    fn missing_resource_is_a_filesystem_error() {
        let fs = MockFilesystem::new();
        let mut resources = MockResourceStore::new();
        resources.expect_get().returning(|_, _| None);
        let renderer = MockTemplateRenderer::new();
        let mut emitter = FileEmitter::new("/p", ResourceSet::Console, &fs, &resources, &renderer);

        let err = emitter
            .copy_static_resource("nope", &RelativePath::new("nope"))
            .unwrap_err();
        assert_eq!(err.category(), crate::error::ErrorCategory::FileSystem);
        assert!(emitter.emitted().is_empty());
    }

    #[test]
    fn undeclared_source_becomes_placeholder() {
        let fs = filesystem_expecting("/p/src/extra.cpp", "");
        let mut resources = MockResourceStore::new();
        resources
            .expect_get()
            .withf(|set, id| *set == ResourceSet::Gui && id == "src/extra.cpp")
            .returning(|_, _| None);
        let renderer = MockTemplateRenderer::new();
        let mut emitter = FileEmitter::new("/p", ResourceSet::Gui, &fs, &resources, &renderer);

        emitter.emit_source(&RelativePath::new("src/extra.cpp")).unwrap();
    }
}
