// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for cmakegen.
//!
//! This module contains the pure model of a generated C++ project: what the
//! user declared ([`BuildSpec`]) and the documents derived from it
//! ([`PackageManifest`], [`RegistryPin`], [`ExternalProject`]). All I/O,
//! templating, and network concerns are handled via ports (traits) defined
//! in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Serde only for wire shapes**: manifests know their JSON form
//! - **Immutable values**: a frozen `BuildSpec` is never mutated
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    BuildSpec, BuildSpecBuilder, ExternalProject, License, PackageManifest, RegistryPin,
    RegistryRequest,
    common::{RelativePath, push_unique},
    manifest::TEST_DEPENDENCY,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{LicenseType, RepoRef, ResourceSet, Revision, TemplateId};

pub use validation::DomainValidator;
