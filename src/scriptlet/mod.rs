//! # Scriptlets
//!
//! Self-contained browser-side countermeasure behaviors and the helpers they
//! need once injected into a page.
//!
//! ## Module structure
//! - `definition`: scriptlet and helper definitions, helper table
//! - `helpers`: destination-side helper functions and the reporting hook
//! - `catalogue`: built-in behaviors with their legacy aliases
//!
//! Bodies are plain function declarations. They receive the request record
//! as their first parameter and never reference anything outside their
//! declared helpers and the reporting hook.

pub mod catalogue;
pub mod definition;
pub mod helpers;

#[cfg(test)]
mod tests;

pub use catalogue::BUILTIN;
pub use definition::{HelperFunction, HelperId, HelperTable, NativeBehavior, ScriptletDefinition};
pub use helpers::{BUILTIN_HELPERS, HOOK_CODE, HOOK_NAME};
