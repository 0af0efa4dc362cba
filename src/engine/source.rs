//! Invocation requests
//!
//! A [`Source`] names a scriptlet by any of its aliases and carries the raw
//! arguments. The [`SourceRecord`] is the reconstructed request that travels
//! with the bundle to the destination.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::runtime::{ObjectRef, Value};
use crate::scriptlet::ScriptletDefinition;
use crate::{Error, Result};

/// Target profile, affects only the bundle wrapper.
///
/// Written in lowercase; read case-insensitively from text, JSON and TOML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Engine {
    /// Self-invoking bundle carrying its own record and arguments
    #[default]
    Extension,
    /// Anonymous function the host calls with record and arguments
    Corelibs,
}

impl Engine {
    /// Wire name of the profile
    pub const fn as_str(&self) -> &'static str {
        match self {
            Engine::Extension => "extension",
            Engine::Corelibs => "corelibs",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extension" => Ok(Engine::Extension),
            "corelibs" => Ok(Engine::Corelibs),
            other => Err(Error::configuration(format!("Unknown engine: {}", other))),
        }
    }
}

impl TryFrom<String> for Engine {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Scriptlet argument as supplied by the caller
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum Arg {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Arrays and objects; not representable as a scriptlet argument
    Structured(serde_json::Value),
    /// Reference to a live host function; not representable as text
    Callable(String),
}

impl Arg {
    /// Convert to a destination value without any coercion
    pub fn to_value(&self) -> Result<Value> {
        Ok(match self {
            Arg::Undefined => Value::Undefined,
            Arg::Null => Value::Null,
            Arg::Bool(b) => Value::Bool(*b),
            Arg::Number(n) => Value::Number(*n),
            Arg::String(s) => Value::String(s.clone()),
            Arg::Structured(json) => {
                return Err(Error::serialization(format!(
                    "structured argument is not supported: {}",
                    json
                )))
            }
            Arg::Callable(name) => {
                return Err(Error::serialization(format!(
                    "function reference `{}` cannot cross into the page",
                    name
                )))
            }
        })
    }
}

impl From<serde_json::Value> for Arg {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Arg::Null,
            serde_json::Value::Bool(b) => Arg::Bool(b),
            serde_json::Value::Number(n) => Arg::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Arg::String(s),
            other => Arg::Structured(other),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::String(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::String(value)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Number(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Number(f64::from(value))
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

/// Invocation request
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Any registered name of the scriptlet
    pub name: String,
    /// Behavior-specific arguments
    #[serde(default)]
    pub args: Vec<Arg>,
    /// Target profile
    #[serde(default)]
    pub engine: Engine,
    /// Enable diagnostic traces at the destination
    #[serde(default)]
    pub verbose: bool,
    /// Diagnostics only
    #[serde(default)]
    pub domain_name: Option<String>,
    /// Diagnostics only
    #[serde(default)]
    pub rule_text: Option<String>,
}

impl Source {
    /// Create a request with no arguments
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            engine: Engine::default(),
            verbose: false,
            domain_name: None,
            rule_text: None,
        }
    }

    /// Parse a JSON request
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append one argument
    pub fn arg<A: Into<Arg>>(mut self, arg: A) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Replace the argument list
    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the target profile
    pub fn engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Set the verbose flag
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Attach the originating domain
    pub fn domain_name<S: Into<String>>(mut self, domain: S) -> Self {
        self.domain_name = Some(domain.into());
        self
    }

    /// Attach the originating rule text
    pub fn rule_text<S: Into<String>>(mut self, rule: S) -> Self {
        self.rule_text = Some(rule.into());
        self
    }
}

/// Request record reconstructed for the destination.
///
/// Carries the canonical name, so every alias yields the same record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRecord {
    pub name: &'static str,
    pub engine: Engine,
    pub verbose: bool,
}

impl SourceRecord {
    /// Build the record for a resolved request
    pub fn new(definition: &ScriptletDefinition, source: &Source) -> Self {
        Self {
            name: definition.name(),
            engine: source.engine,
            verbose: source.verbose,
        }
    }

    /// JSON text embedded in the bundle
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The record as a destination object
    pub fn to_value(&self) -> Value {
        let record = ObjectRef::new();
        record.set("name", Value::String(self.name.to_string()));
        record.set("engine", Value::String(self.engine.to_string()));
        record.set("verbose", Value::Bool(self.verbose));
        Value::Object(record)
    }
}
