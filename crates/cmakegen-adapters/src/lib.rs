//! Infrastructure adapters for cmakegen.
//!
//! This crate implements the ports defined in `cmakegen_core::application::ports`.
//! It holds every external dependency and all I/O: the local filesystem,
//! Handlebars rendering, bundled resources, the GitHub API and child processes.

pub mod filesystem;
pub mod github;
pub mod process;
pub mod renderer;
pub mod resources;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use github::{GithubResolver, GithubSettings};
pub use process::SystemProcessRunner;
pub use renderer::HandlebarsRenderer;
pub use resources::EmbeddedResources;
