//! Template rendering adapters.
//!
//! Templates are embedded into the binary at compile time in [`embedded`]
//! and rendered at runtime with Handlebars by [`HandlebarsRenderer`].

pub mod embedded;
mod handlebars;

pub use self::handlebars::HandlebarsRenderer;
