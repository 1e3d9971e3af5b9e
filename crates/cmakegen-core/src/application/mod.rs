//! Application layer for cmakegen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService, BuildToolService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    BuildToolService, FileEmitter, GenerateOptions, GenerateService, GenerationReport, Platform,
    Resolution,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    DependencyResolver, Filesystem, ProcessCommand, ProcessRunner, RenderContext, ResourceStore,
    TemplateRenderer,
};

pub use error::ApplicationError;
