//! Configuration for the apportion budget allocator.
//!
//! Load settings from a TOML (or YAML) file to control where audit records
//! land and how amounts are rendered, without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use apportion_config::BudgetConfig;
//!
//! let config = BudgetConfig::from_toml_str(r#"
//!     audit_dir = "/var/log/apportion"
//!     currency_symbol = "R$"
//! "#).unwrap();
//!
//! assert_eq!(config.currency_symbol, "R$");
//! ```
//!
//! Use defaults when the file is missing:
//!
//! ```
//! use apportion_config::BudgetConfig;
//!
//! let config = BudgetConfig::load("apportion.toml").unwrap_or_default();
//! // Proceeds with defaults if the file doesn't exist
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Main allocator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BudgetConfig {
    /// Directory receiving one audit record per solve attempt.
    #[serde(default = "default_audit_dir")]
    pub audit_dir: PathBuf,

    /// Symbol prefixed to rendered amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            audit_dir: default_audit_dir(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl BudgetConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }
}

fn default_audit_dir() -> PathBuf {
    PathBuf::from("audit-log")
}

fn default_currency_symbol() -> String {
    "$".to_string()
}
