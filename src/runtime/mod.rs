//! # Destination runtime model
//!
//! Native rendition of the contract every generated bundle relies on once it
//! runs inside a page: typed values, the coercion grammar, the pattern
//! compiler, the reporting hook, and installable wrappers over a fake global
//! object. Behaviors with a native model can be exercised end to end without
//! a browser.
//!
//! The model is single-threaded like the page event loop it stands in for;
//! values are `Rc`-based and never cross threads.
//!
//! ## Module structure
//! - `value`: values, functions and guarded objects
//! - `env`: the fake environment and its install step
//! - `coerce`: the value coercion grammar
//! - `pattern`: the string pattern compiler
//! - `hook`: the reporting hook
//! - `behaviors`: native models of catalogue entries

pub mod behaviors;
pub mod coerce;
pub mod env;
pub mod hook;
pub mod pattern;
pub mod value;


pub use coerce::{canonical_text, coerce, coerce_constant, MAX_CONSTANT_MAGNITUDE};
pub use env::Environment;
pub use pattern::Pattern;
pub use value::{Function, ObjectRef, TypeTag, Value};

use crate::engine::{Registry, Source, SourceRecord};
use crate::{Error, Result};

/// Resolve `source` and run its native model against `env`.
///
/// Arguments go through the same representability check as generation.
/// Fails with [`Error::Unsupported`] when the scriptlet has no native model.
pub fn run(registry: &Registry, source: &Source, env: &Environment) -> Result<()> {
    let definition = registry.lookup(&source.name)?;
    let native = definition.native().ok_or_else(|| {
        Error::unsupported(format!("{} has no native model", definition.name()))
    })?;

    let args = source
        .args
        .iter()
        .map(|arg| arg.to_value())
        .collect::<Result<Vec<_>>>()?;
    let record = SourceRecord::new(definition, source);

    tracing::debug!(scriptlet = definition.name(), args = args.len(), "Running native model");
    native(env, &record, &args);

    Ok(())
}
