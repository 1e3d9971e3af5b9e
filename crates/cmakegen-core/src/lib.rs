//! cmakegen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the cmakegen
//! C++ project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           cmakegen-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerateService, BuildToolService)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, Resolver, Renderer, ...)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    cmakegen-adapters (Infrastructure)   │
//! │ (LocalFilesystem, GithubResolver, ...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (BuildSpec, PackageManifest, RegistryPin)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cmakegen_core::prelude::*;
//!
//! // 1. Describe the project
//! let spec = BuildSpec::builder("MyProject")
//!     .add_source("src/main.cpp")
//!     .add_vcpkg_dependency("fmt")
//!     .build()?;
//!
//! // 2. Use application service (with injected adapters)
//! let service = GenerateService::new(filesystem, resources, renderer, resolver);
//! let report = service.build_files(spec, GenerateOptions::default())?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BuildToolService, GenerateOptions, GenerateService, GenerationReport,
        ports::{
            DependencyResolver, Filesystem, ProcessCommand, ProcessRunner, RenderContext,
            ResourceStore, TemplateRenderer,
        },
    };
    pub use crate::domain::{
        BuildSpec, BuildSpecBuilder, ExternalProject, LicenseType, PackageManifest, RegistryPin,
        RepoRef, ResourceSet, Revision, TemplateId,
    };
    pub use crate::error::{GenError, GenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
