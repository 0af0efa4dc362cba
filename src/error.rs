//! Unified error types for Scriptlet-Oxide

use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Scriptlet-Oxide
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No scriptlet is registered under the requested name
    #[error("Scriptlet not found: {0}")]
    NotFound(String),

    /// Argument cannot be rendered as text for the destination
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Helper dependency graph contains a cycle
    #[error("Cyclic helper dependency: {0}")]
    CyclicDependency(String),

    /// Name or alias registered twice
    #[error("Duplicate scriptlet name: {0}")]
    DuplicateName(String),

    /// Declared helper dependency is not in the helper table
    #[error("Missing helper: {0}")]
    MissingHelper(String),

    /// Rule text could not be parsed
    #[error("Invalid scriptlet rule: {0}")]
    InvalidRule(String),

    /// Operation not supported for this scriptlet
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Script sink rejected a bundle
    #[error("Injection failed: {0}")]
    Injection(String),

    /// Injected script not found
    #[error("Script not found: {0}")]
    ScriptNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create a new not found error
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Error::NotFound(name.into())
    }

    /// Create a new serialization error
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Error::Serialization(msg.into())
    }

    /// Create a new cyclic dependency error
    pub fn cyclic_dependency<S: Into<String>>(path: S) -> Self {
        Error::CyclicDependency(path.into())
    }

    /// Create a new duplicate name error
    pub fn duplicate_name<S: Into<String>>(name: S) -> Self {
        Error::DuplicateName(name.into())
    }

    /// Create a new missing helper error
    pub fn missing_helper<S: Into<String>>(id: S) -> Self {
        Error::MissingHelper(id.into())
    }

    /// Create a new invalid rule error
    pub fn invalid_rule<S: Into<String>>(msg: S) -> Self {
        Error::InvalidRule(msg.into())
    }

    /// Create a new unsupported error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Error::Unsupported(msg.into())
    }

    /// Create a new injection error
    pub fn injection<S: Into<String>>(msg: S) -> Self {
        Error::Injection(msg.into())
    }

    /// Create a new script not found error
    pub fn script_not_found<S: Into<String>>(id: S) -> Self {
        Error::ScriptNotFound(id.into())
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Whether the error was caused by the request rather than the catalogue
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::Serialization(_) | Error::InvalidRule(_)
        )
    }
}
