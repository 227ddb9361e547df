//! Application configuration
//!
//! Everything a run needs is grouped under one TOML document:
//!
//! ```toml
//! [board]
//! rows = 10
//! columns = 4
//! colors = 7
//!
//! [genetic]
//! pool_size = 500
//! crossover = "shuffle"
//!
//! [exhaustive]
//! memory_budget_mb = 1024
//! ```
//!
//! Missing sections and keys fall back to their defaults.

use std::path::Path;

use crate::core::BoardSettings;
use crate::error::ConfigError;
use crate::solver::{ExhaustiveSettings, GeneticSettings};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardSettings,
    pub genetic: GeneticSettings,
    pub exhaustive: ExhaustiveSettings,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read, is not valid TOML, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    ///
    /// # Errors
    /// Same as [`AppConfig::load`] when the file exists.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    /// Returns `ConfigError` on parse or validation failure.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError::Validation` naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate()?;
        self.genetic.validate()?;
        self.exhaustive.validate()?;
        Ok(())
    }
}
