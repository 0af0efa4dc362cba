//! # Scriptlet injection
//!
//! Delivers generated bundles to a host-provided sink and keeps track of
//! what went into each target. Generation failures never reach the sink.
//!
//! ## Module structure
//! - `traits`: sink and injector traits
//! - `injector`: injector implementation
//! - `mock`: recording sink for tests
//!
//! ## Usage
//! ```rust,no_run
//! use scriptlet_oxide::engine::Registry;
//! use scriptlet_oxide::injector::{RecordingSink, ScriptletInjector, ScriptletInjectorImpl};
//! use std::sync::Arc;
//!
//! # async fn example() -> scriptlet_oxide::Result<()> {
//! let registry = Arc::new(Registry::builtin()?);
//! let injector = ScriptletInjectorImpl::new(registry, Arc::new(RecordingSink::new()));
//! let injected = injector
//!     .inject_rule("page-1", "example.org##+js(nostif, ads, 300)")
//!     .await?;
//! println!("Injected {} as {}", injected.name, injected.script_id);
//! # Ok(())
//! # }
//! ```

pub mod traits;
pub mod injector;
pub mod mock;

#[cfg(test)]
mod tests;

pub use traits::{InjectedScriptlet, ScriptSink, ScriptletInjector};
pub use injector::ScriptletInjectorImpl;
pub use mock::RecordingSink;
