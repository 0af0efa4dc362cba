//! Configuration management for Scriptlet-Oxide

use crate::engine::Engine;
use crate::{Error, Result};
use serde::Deserialize;
use std::env;

/// Generation defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target profile used when a request does not name one
    pub engine: Engine,

    /// Emit diagnostic traces from the reporting hook
    pub verbose: bool,

    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: Engine::Extension,
            verbose: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(engine) = env::var("SCRIPTLETS_ENGINE") {
            config.engine = engine
                .parse()
                .map_err(|_| Error::configuration("Invalid SCRIPTLETS_ENGINE"))?;
        }

        if let Ok(verbose) = env::var("SCRIPTLETS_VERBOSE") {
            config.verbose = verbose
                .parse()
                .map_err(|_| Error::configuration("Invalid SCRIPTLETS_VERBOSE"))?;
        }

        if let Ok(log_level) = env::var("SCRIPTLETS_LOG_LEVEL") {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.engine, Engine::Extension);
        assert!(!config.verbose);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_from_toml() {
        let config = Config::from_toml("engine = \"corelibs\"\nverbose = true\n").unwrap();
        assert_eq!(config.engine, Engine::Corelibs);
        assert!(config.verbose);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_engine_is_case_insensitive() {
        let config = Config::from_toml("engine = \"Corelibs\"\n").unwrap();
        assert_eq!(config.engine, Engine::Corelibs);
        assert_eq!(config.engine, "CORELIBS".parse::<Engine>().unwrap());
    }

    #[test]
    fn test_config_rejects_unknown_engine() {
        let result = Config::from_toml("engine = \"chromium\"\n");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
