//! # Generation engine
//!
//! Turns an invocation request into one self-contained piece of source text.
//!
//! Data flows one way: request → registry lookup → dependency closure →
//! argument serialization → block assembly → output string. Nothing here
//! executes generated code or holds mutable state between requests, so a
//! shared [`Registry`] can serve any number of threads without locking.
//!
//! ## Module structure
//! - `source`: requests, arguments, engine profiles, the request record
//! - `registry`: name and alias index over the catalogue
//! - `resolver`: dependency closure with cycle detection
//! - `serialize`: argument rendering
//! - `compiler`: bundle assembly
//! - `rule`: filter-list rule parsing
//!
//! ## Usage
//! ```rust,no_run
//! use scriptlet_oxide::engine::{Compiler, Registry, Source};
//!
//! # fn example() -> scriptlet_oxide::Result<()> {
//! let registry = Registry::builtin()?;
//! let source = Source::new("ubo-set-constant.js")
//!     .with_args(["ads.enabled", "false"])
//!     .verbose(true);
//! let code = Compiler::new(&registry).generate(&source)?;
//! println!("{}", code);
//! # Ok(())
//! # }
//! ```

pub mod compiler;
pub mod registry;
pub mod resolver;
pub mod rule;
pub mod serialize;
pub mod source;


pub use compiler::{invoke, Block, BlockKind, Bundle, Compiler};
pub use registry::{Registry, RegistryBuilder};
pub use resolver::DependencyResolver;
pub use rule::{RuleSyntax, ScriptletRule};
pub use source::{Arg, Engine, Source, SourceRecord};
