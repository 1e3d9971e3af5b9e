use crate::domain::{
    entities::{BuildSpec, common::RelativePath},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_build_spec(spec: &BuildSpec) -> Result<(), DomainError> {
        spec.validate()
    }

    /// Validate a user-supplied project name before it becomes a directory.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyField {
                field: "project name",
            });
        }
        if name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(DomainError::InvalidProjectDir { path: name.into() });
        }
        Ok(())
    }

    pub fn validate_source_path(path: &str) -> Result<RelativePath, DomainError> {
        RelativePath::try_new(path)
    }
}
