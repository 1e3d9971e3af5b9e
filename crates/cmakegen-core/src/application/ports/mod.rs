//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `cmakegen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `ResourceStore`: Bundled static files
//!   - `TemplateRenderer`: Template rendering
//!   - `DependencyResolver`: Remote commit and manifest lookup
//!   - `ProcessRunner`: External build tool invocation
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    DependencyResolver, Filesystem, ProcessCommand, ProcessRunner, RenderContext, ResourceStore,
    TemplateRenderer,
};
