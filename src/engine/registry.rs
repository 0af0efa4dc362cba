//! Scriptlet registry
//!
//! Built once, read-only afterwards. Every definition is indexed under every
//! name it declares; names must be disjoint across definitions.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use super::resolver::DependencyResolver;
use super::rule::ScriptletRule;
use crate::scriptlet::{HelperFunction, HelperTable, ScriptletDefinition, BUILTIN};
use crate::{Error, Result};

static BUILTIN_REGISTRY: OnceLock<Result<Registry>> = OnceLock::new();

/// All scriptlet definitions, indexed by name and alias
#[derive(Debug, Clone)]
pub struct Registry {
    definitions: Vec<Arc<ScriptletDefinition>>,
    index: HashMap<&'static str, usize>,
    helpers: HelperTable,
}

impl Registry {
    /// Start building a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry of the built-in catalogue
    pub fn builtin() -> Result<Self> {
        let mut builder = RegistryBuilder::new().with_helpers(HelperTable::builtin());
        for definition in BUILTIN {
            builder = builder.register(**definition)?;
        }
        builder.build()
    }

    /// Shared built-in registry, built on first use.
    ///
    /// A failed build is kept and reported to every caller with its
    /// original kind.
    pub fn global() -> Result<&'static Registry> {
        shared(&BUILTIN_REGISTRY, Registry::builtin)
    }

    /// Resolve a name or alias.
    ///
    /// Exact, case-sensitive match. Every name of a scriptlet returns the
    /// same definition object.
    pub fn lookup(&self, name: &str) -> Result<&Arc<ScriptletDefinition>> {
        self.get(name).ok_or_else(|| Error::not_found(name))
    }

    /// Resolve a name or alias, if registered
    pub fn get(&self, name: &str) -> Option<&Arc<ScriptletDefinition>> {
        self.index.get(name).map(|&i| &self.definitions[i])
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered definitions in registration order
    pub fn definitions(&self) -> &[Arc<ScriptletDefinition>] {
        &self.definitions
    }

    /// Every registered name and alias, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.index.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Helper table the definitions resolve against
    pub fn helpers(&self) -> &HelperTable {
        &self.helpers
    }

    /// Dependency closure of `definition`
    pub fn closure(&self, definition: &ScriptletDefinition) -> Result<Vec<&HelperFunction>> {
        DependencyResolver::new(&self.helpers).closure(definition)
    }

    /// Whether `rule_text` parses and names a registered scriptlet
    pub fn is_valid_rule(&self, rule_text: &str) -> bool {
        ScriptletRule::parse(rule_text)
            .map(|rule| self.contains(&rule.name))
            .unwrap_or(false)
    }
}

/// Builder enforcing the registry invariants
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    definitions: Vec<Arc<ScriptletDefinition>>,
    index: HashMap<&'static str, usize>,
    helpers: HelperTable,
}

impl RegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the helper table
    pub fn with_helpers(mut self, helpers: HelperTable) -> Self {
        self.helpers = helpers;
        self
    }

    /// Add one helper
    pub fn helper(mut self, helper: HelperFunction) -> Self {
        self.helpers.insert(helper);
        self
    }

    /// Register a definition under all of its names.
    ///
    /// Fails with [`Error::DuplicateName`] if any name is already taken.
    pub fn register(mut self, definition: ScriptletDefinition) -> Result<Self> {
        let position = self.definitions.len();
        let mut names = Vec::new();

        for name in definition.names() {
            if self.index.contains_key(name) || names.contains(&name) {
                return Err(Error::duplicate_name(name));
            }
            names.push(name);
        }

        for name in names {
            self.index.insert(name, position);
        }
        self.definitions.push(Arc::new(definition));

        Ok(self)
    }

    /// Validate every dependency closure and freeze the registry
    pub fn build(self) -> Result<Registry> {
        let resolver = DependencyResolver::new(&self.helpers);
        for definition in &self.definitions {
            resolver.closure(definition)?;
        }

        tracing::debug!(
            scriptlets = self.definitions.len(),
            names = self.index.len(),
            helpers = self.helpers.len(),
            "Scriptlet registry built"
        );

        Ok(Registry {
            definitions: self.definitions,
            index: self.index,
            helpers: self.helpers,
        })
    }
}

/// Build into `cell` once and hand out the shared result
pub(crate) fn shared(
    cell: &'static OnceLock<Result<Registry>>,
    build: impl FnOnce() -> Result<Registry>,
) -> Result<&'static Registry> {
    cell.get_or_init(build).as_ref().map_err(replay)
}

/// Copy of a stored build failure
fn replay(error: &Error) -> Error {
    match error {
        Error::CyclicDependency(path) => Error::CyclicDependency(path.clone()),
        Error::DuplicateName(name) => Error::DuplicateName(name.clone()),
        Error::MissingHelper(id) => Error::MissingHelper(id.clone()),
        other => Error::configuration(other.to_string()),
    }
}
