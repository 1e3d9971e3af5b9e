//! The vcpkg package manifest (`vcpkg.json`).
//!
//! One type serves both directions: the manifest the generator writes for the
//! new project, and the manifest fetched from an external project's
//! repository to discover its transitive dependencies.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

const DEFAULT_VERSION: &str = "0.1.0";
const DEFAULT_LICENSE: &str = "MIT";

/// Test framework dependency added when a test sub-project is generated.
pub const TEST_DEPENDENCY: &str = "gtest";

/// `vcpkg.json` contents.
///
/// Field order here is the key order in the serialized file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageManifest {
    pub name: String,
    #[serde(rename = "version-string")]
    pub version: String,
    pub homepage: String,
    pub description: String,
    pub license: String,
    pub dependencies: Vec<String>,
}

impl PackageManifest {
    /// A manifest with default version and license and no dependencies.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: DEFAULT_VERSION.into(),
            homepage: String::new(),
            description: description.into(),
            license: DEFAULT_LICENSE.into(),
            dependencies: Vec::new(),
        }
    }

    /// Decode a manifest from raw JSON bytes.
    ///
    /// Unknown fields are ignored. Dependencies may be plain names or
    /// `{"name": ...}` objects; only the name is kept.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, DomainError> {
        let wire: WireManifest =
            serde_json::from_slice(bytes).map_err(|e| DomainError::InvalidManifest {
                reason: e.to_string(),
            })?;

        Ok(Self {
            name: wire.name,
            version: wire.version.unwrap_or_else(|| DEFAULT_VERSION.into()),
            homepage: wire.homepage,
            description: wire.description.into_text(),
            license: wire.license.unwrap_or_else(|| DEFAULT_LICENSE.into()),
            dependencies: wire
                .dependencies
                .into_iter()
                .map(WireDependency::into_name)
                .collect(),
        })
    }
}

// ── Wire schema ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct WireManifest {
    #[serde(default)]
    name: String,
    #[serde(
        default,
        rename = "version-string",
        alias = "version",
        alias = "version-semver",
        alias = "version-date"
    )]
    version: Option<String>,
    #[serde(default)]
    homepage: String,
    #[serde(default)]
    description: WireDescription,
    #[serde(default)]
    license: Option<String>,
    #[serde(default)]
    dependencies: Vec<WireDependency>,
}

/// vcpkg allows the description to be a single string or a list of lines.
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum WireDescription {
    #[default]
    Missing,
    Text(String),
    Lines(Vec<String>),
}

impl WireDescription {
    fn into_text(self) -> String {
        match self {
            Self::Missing => String::new(),
            Self::Text(text) => text,
            Self::Lines(lines) => lines.join("\n"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireDependency {
    Name(String),
    Detailed { name: String },
}

impl WireDependency {
    fn into_name(self) -> String {
        match self {
            Self::Name(name) | Self::Detailed { name } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_vcpkg_key_order() {
        let mut manifest = PackageManifest::new("myproject", "Demo");
        manifest.dependencies.push("fmt".into());

        let json = serde_json::to_string(&manifest).unwrap();
        assert_eq!(
            json,
            r#"{"name":"myproject","version-string":"0.1.0","homepage":"","description":"Demo","license":"MIT","dependencies":["fmt"]}"#
        );
    }

    #[test]
    fn decodes_plain_and_detailed_dependencies() {
        let json = br#"{
            "name": "cppsdl3",
            "version-string": "1.2.0",
            "dependencies": ["fmt", {"name": "sdl3", "features": ["vulkan"]}, "spdlog"],
            "builtin-baseline": "ignored"
        }"#;

        let manifest = PackageManifest::from_json_slice(json).unwrap();
        assert_eq!(manifest.name, "cppsdl3");
        assert_eq!(manifest.version, "1.2.0");
        assert_eq!(manifest.dependencies, ["fmt", "sdl3", "spdlog"]);
        assert_eq!(manifest.license, "MIT");
    }

    #[test]
    fn accepts_version_aliases_and_line_descriptions() {
        let json = br#"{"name": "x", "version": "2.0", "description": ["a", "b"]}"#;
        let manifest = PackageManifest::from_json_slice(json).unwrap();
        assert_eq!(manifest.version, "2.0");
        assert_eq!(manifest.description, "a\nb");
        assert!(manifest.dependencies.is_empty());
    }

    #[test]
    fn rejects_malformed_json_with_location() {
        let err = PackageManifest::from_json_slice(b"{\"name\": \"x\",").unwrap_err();
        match err {
            DomainError::InvalidManifest { reason } => assert!(reason.contains("line 1")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_wrongly_typed_dependencies() {
        let err = PackageManifest::from_json_slice(br#"{"dependencies": [42]}"#);
        assert!(matches!(err, Err(DomainError::InvalidManifest { .. })));
    }
}
