//! Handlebars renderer over the embedded templates.

use cmakegen_core::{
    application::{
        ApplicationError,
        ports::{RenderContext, TemplateRenderer},
    },
    domain::TemplateId,
    error::GenResult,
};
use handlebars::{Handlebars, handlebars_helper};
use tracing::{debug, instrument};

use super::embedded;

// Escapes free text for the inside of a CMake quoted argument.
handlebars_helper!(cmake_quote: |s: str| {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
});

/// Renders [`TemplateId`]s with Handlebars.
///
/// Strict mode is on, so a template referencing a key the context lacks
/// fails instead of rendering an empty string. Output is never HTML-escaped.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    /// Register every embedded template.
    pub fn new() -> GenResult<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_helper("cmake_quote", Box::new(cmake_quote));

        for id in TemplateId::ALL {
            registry
                .register_template_string(id.as_str(), embedded::source(id))
                .map_err(|e| ApplicationError::RenderingFailed {
                    reason: format!("template '{id}' does not parse: {e}"),
                })?;
        }
        debug!(templates = TemplateId::ALL.len(), "Registered templates");

        Ok(Self { registry })
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    #[instrument(skip_all, fields(template = %template))]
    fn render(&self, template: TemplateId, context: &RenderContext) -> GenResult<String> {
        self.registry
            .render(template.as_str(), context.as_map())
            .map_err(|e| {
                ApplicationError::RenderingFailed {
                    reason: format!("{template}: {e}"),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmakegen_core::domain::LicenseType;

    fn build_descriptor_context() -> RenderContext {
        let mut ctx = RenderContext::new();
        ctx.insert("projectName", "Demo").unwrap();
        ctx.insert("description", "A <demo> & more").unwrap();
        ctx.insert("sources", ["src/main.cpp", "src/a.cpp"]).unwrap();
        ctx.insert("vcpkgDependencies", ["fmt"]).unwrap();
        ctx.insert("linkLibraries", ["fmt::fmt"]).unwrap();
        ctx.insert("testProjectName", "Demo_Test").unwrap();
        ctx.insert("linkExternalLibraries", Option::<Vec<String>>::None)
            .unwrap();
        ctx.insert("extraFiles", ["vcpkg.json"]).unwrap();
        ctx
    }

    #[test]
    fn all_embedded_templates_parse() {
        assert!(HandlebarsRenderer::new().is_ok());
    }

    #[test]
    fn build_descriptor_lists_sources_and_packages() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let out = renderer
            .render(TemplateId::BuildDescriptor, &build_descriptor_context())
            .unwrap();

        assert!(out.contains("project(Demo"));
        assert!(out.contains("\"A <demo> & more\""));
        assert!(out.contains("\tsrc/main.cpp\n\tsrc/a.cpp\n"));
        assert!(out.contains("find_package(fmt CONFIG REQUIRED)"));
        assert!(out.contains("\t\tfmt::fmt\n"));
        assert!(out.contains("add_subdirectory(Demo_Test)"));
        assert!(!out.contains("ExternalFetchContent.cmake"));
    }

    #[test]
    fn description_cannot_break_out_of_its_quotes() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let mut ctx = build_descriptor_context();
        ctx.insert("description", r#"The "best" C:\tool ${HOME}"#)
            .unwrap();

        let out = renderer.render(TemplateId::BuildDescriptor, &ctx).unwrap();
        assert!(out.contains(r#""The \"best\" C:\\tool \${HOME}""#));
    }

    #[test]
    fn external_projects_are_included_and_linked() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let mut ctx = build_descriptor_context();
        ctx.insert("linkExternalLibraries", ["CppSdl3"]).unwrap();
        ctx.insert("testProjectName", Option::<String>::None).unwrap();

        let out = renderer.render(TemplateId::BuildDescriptor, &ctx).unwrap();
        assert!(out.contains("include(ExternalFetchContent.cmake)"));
        assert!(out.contains("\t\tCppSdl3\n"));
        assert!(!out.contains("add_subdirectory"));
    }

    #[test]
    fn missing_key_fails_in_strict_mode() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let mut ctx = RenderContext::new();
        ctx.insert("projectName", "Demo").unwrap();

        let err = renderer
            .render(TemplateId::BuildDescriptor, &ctx)
            .unwrap_err();
        assert!(err.to_string().contains("CMakeLists.txt"));
    }

    #[test]
    fn ci_keeps_workflow_expressions() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let mut ctx = RenderContext::new();
        ctx.insert("projectName", "Demo").unwrap();
        ctx.insert("testProjectName", "Demo_Test").unwrap();

        let out = renderer.render(TemplateId::Ci, &ctx).unwrap();
        assert!(out.contains("runs-on: ${{ matrix.os }}"));
        assert!(out.contains("ctest"));
    }

    #[test]
    fn license_names_author_and_year() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let mut ctx = RenderContext::new();
        ctx.insert("author", "Jane Doe").unwrap();
        ctx.insert("year", Some(2024)).unwrap();

        let out = renderer
            .render(TemplateId::License(LicenseType::Mit), &ctx)
            .unwrap();
        assert!(out.starts_with("MIT License"));
        assert!(out.contains("Copyright (c) 2024 Jane Doe"));
    }

    #[test]
    fn fetch_content_declares_each_project() {
        let renderer = HandlebarsRenderer::new().unwrap();
        let mut ctx = RenderContext::new();
        ctx.insert(
            "externalProjects",
            serde_json::json!([
                {"name": "lib", "git_url": "https://github.com/acme/lib.git", "git_tag": "abc123"},
                {"name": "CppSdl3", "git_url": "https://github.com/mwthinker/CppSdl3.git", "git_tag": "def456"}
            ]),
        )
        .unwrap();

        let out = renderer
            .render(TemplateId::ExternalFetchContent, &ctx)
            .unwrap();
        assert_eq!(out.matches("FetchContent_Declare(").count(), 2);
        assert!(out.contains("\t\tabc123\n"));
        assert!(out.contains("FetchContent_MakeAvailable(lib CppSdl3)"));
    }
}
