//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a project" or "configure it with CMake".

pub mod build_tool_service;
pub mod file_emitter;
pub mod generate_service;

pub use build_tool_service::{BuildToolService, DEFAULT_TIMEOUT, Platform};
pub use file_emitter::FileEmitter;
pub use generate_service::{GenerateOptions, GenerateService, GenerationReport, Resolution};
