//! Scriptlet-Oxide: scriptlet generation engine for content blockers
//!
//! This library resolves scriptlet requests by name or alias, computes the
//! helper closure each behavior needs, and emits one self-contained piece of
//! source text ready for injection into a page.

pub mod error;
pub mod config;
pub mod logging;

pub mod scriptlet;
pub mod engine;
pub mod runtime;
pub mod injector;

// Re-exports
pub use config::Config;
pub use engine::{invoke, Compiler, Engine, Registry, Source};
pub use error::{Error, Result};

/// Scriptlet-Oxide library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
