//! Static files bundled with the generator.
//!
//! Shared resources sit at the root of `resources/`. A resource set may
//! override any of them from `resources/<set>/`.

use cmakegen_core::{application::ports::ResourceStore, domain::ResourceSet};

const SOURCE_PREFIX: &str = "src/";

static RESOURCES: &[(&str, &str)] = &[
    ("src/main.cpp", include_str!("../resources/src/main.cpp")),
    ("tests.cpp", include_str!("../resources/tests.cpp")),
    ("gitattributes", include_str!("../resources/gitattributes")),
    ("gitignore", include_str!("../resources/gitignore")),
    (
        "CMakePresets.json",
        include_str!("../resources/CMakePresets.json"),
    ),
    ("gui/src/main.cpp", include_str!("../resources/gui/src/main.cpp")),
    (
        "gui/src/testwindow.h",
        include_str!("../resources/gui/src/testwindow.h"),
    ),
    (
        "gui/src/testwindow.cpp",
        include_str!("../resources/gui/src/testwindow.cpp"),
    ),
];

/// Resource store backed by files compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedResources;

impl EmbeddedResources {
    pub fn new() -> Self {
        Self
    }

    /// Starter sources a set provides, as project-relative paths.
    ///
    /// A set without sources of its own falls back to the shared ones.
    pub fn starter_sources(set: ResourceSet) -> Vec<&'static str> {
        let own = sources_under(Some(set.as_str()));
        if own.is_empty() {
            sources_under(None)
        } else {
            own
        }
    }
}

fn sources_under(set: Option<&str>) -> Vec<&'static str> {
    RESOURCES
        .iter()
        .filter_map(|&(id, _)| match set {
            Some(set) => id.strip_prefix(set)?.strip_prefix('/'),
            None => Some(id),
        })
        .filter(|id| id.starts_with(SOURCE_PREFIX))
        .collect()
}

fn lookup(id: &str) -> Option<&'static str> {
    RESOURCES
        .iter()
        .find(|(candidate, _)| *candidate == id)
        .map(|(_, content)| *content)
}

impl ResourceStore for EmbeddedResources {
    fn get(&self, set: ResourceSet, id: &str) -> Option<String> {
        lookup(&format!("{}/{}", set.as_str(), id))
            .or_else(|| lookup(id))
            .map(str::to_string)
    }
}
