pub mod build_spec;
pub mod common;
pub mod external_project;
pub mod manifest;
pub mod registry_pin;

pub use crate::domain::DomainError;
pub use build_spec::{BuildSpec, BuildSpecBuilder, License, RegistryRequest};
pub use external_project::ExternalProject;
pub use manifest::PackageManifest;
pub use registry_pin::RegistryPin;
