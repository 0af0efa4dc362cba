//! Scriptlet and helper definitions
//!
//! A scriptlet is a named behavior body plus the helpers it needs at the
//! destination. Definitions are plain data built from `'static` text so the
//! catalogue can live in statics and be shared across threads.

use std::collections::HashMap;
use std::fmt;

use crate::engine::SourceRecord;
use crate::runtime::{Environment, Value};

/// Opaque identifier of a helper function.
///
/// The identifier doubles as the helper's function name in generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HelperId(&'static str);

impl HelperId {
    /// Create a helper identifier
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Function name of the helper
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for HelperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Helper routine inlined into bundles by its definition text
#[derive(Debug, Clone, Copy)]
pub struct HelperFunction {
    /// Identifier, equal to the function name declared by `code`
    pub id: HelperId,
    /// Helpers this one calls
    pub dependencies: &'static [HelperId],
    /// Function declaration text
    pub code: &'static str,
}

impl HelperFunction {
    /// Create a helper
    pub const fn new(id: HelperId, dependencies: &'static [HelperId], code: &'static str) -> Self {
        Self {
            id,
            dependencies,
            code,
        }
    }
}

/// Native counterpart of a behavior, executed against a fake [`Environment`]
pub type NativeBehavior = fn(&Environment, &SourceRecord, &[Value]);

/// A registered scriptlet
#[derive(Debug, Clone, Copy)]
pub struct ScriptletDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    function_name: &'static str,
    dependencies: &'static [HelperId],
    body: &'static str,
    native: Option<NativeBehavior>,
}

impl ScriptletDefinition {
    /// Create a definition.
    ///
    /// `body` must declare a function named `function_name` taking
    /// `(source, ...args)`.
    pub const fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        function_name: &'static str,
        dependencies: &'static [HelperId],
        body: &'static str,
    ) -> Self {
        Self {
            name,
            aliases,
            function_name,
            dependencies,
            body,
            native: None,
        }
    }

    /// Attach a native model of the behavior
    pub const fn with_native(mut self, native: NativeBehavior) -> Self {
        self.native = Some(native);
        self
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Legacy and cross-ecosystem aliases
    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    /// Canonical name followed by every alias
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    /// Name of the function declared by the body
    pub fn function_name(&self) -> &'static str {
        self.function_name
    }

    /// Directly declared helper dependencies
    pub fn dependencies(&self) -> &'static [HelperId] {
        self.dependencies
    }

    /// Function declaration text of the behavior
    pub fn body(&self) -> &'static str {
        self.body
    }

    /// Native model, if the behavior has one
    pub fn native(&self) -> Option<NativeBehavior> {
        self.native
    }
}

/// Helper functions indexed by identifier
#[derive(Debug, Clone, Default)]
pub struct HelperTable {
    helpers: HashMap<HelperId, HelperFunction>,
}

impl HelperTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding every built-in helper
    pub fn builtin() -> Self {
        super::helpers::BUILTIN_HELPERS.iter().copied().collect()
    }

    /// Insert a helper, returning the one it replaced
    pub fn insert(&mut self, helper: HelperFunction) -> Option<HelperFunction> {
        self.helpers.insert(helper.id, helper)
    }

    /// Look up a helper
    pub fn get(&self, id: HelperId) -> Option<&HelperFunction> {
        self.helpers.get(&id)
    }

    /// Whether the table holds `id`
    pub fn contains(&self, id: HelperId) -> bool {
        self.helpers.contains_key(&id)
    }

    /// Number of helpers
    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Iterate helpers in identifier order
    pub fn iter(&self) -> impl Iterator<Item = &HelperFunction> {
        let mut helpers: Vec<_> = self.helpers.values().collect();
        helpers.sort_by_key(|helper| helper.id);
        helpers.into_iter()
    }
}

impl FromIterator<HelperFunction> for HelperTable {
    fn from_iter<I: IntoIterator<Item = HelperFunction>>(iter: I) -> Self {
        let mut table = HelperTable::new();
        for helper in iter {
            table.insert(helper);
        }
        table
    }
}
