//! Configuration management for bmitrack.
//!
//! Configuration is layered with figment: built-in defaults, then a TOML
//! config file, then `BMITRACK_` environment variables.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "bmitrack";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "bmi.db";

/// Application configuration.
///
/// Loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `BMITRACK_`, sections separated
///    by `__`, e.g. `BMITRACK_STORAGE__DATABASE_PATH`)
/// 2. TOML config file at `~/.config/bmitrack/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Input plausibility limits.
    pub input: InputLimits,
    /// Display configuration.
    pub display: DisplayConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/bmitrack/bmi.db`
    pub database_path: Option<PathBuf>,
}

/// Upper bounds for accepted input values.
///
/// Anything above these is rejected as a validation failure before it can
/// reach the store. Both bounds must be positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    /// Maximum accepted weight in pounds.
    pub max_weight_lb: f64,
    /// Maximum accepted height in inches.
    pub max_height_in: f64,
}

/// Display-related configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Maximum number of history entries to show. 0 means unlimited.
    pub history_limit: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_weight_lb: 1500.0,
            max_height_in: 120.0,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing, or validation
    /// fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config file path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing, or validation
    /// fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("BMITRACK_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.input.max_weight_lb.is_finite() || self.input.max_weight_lb <= 0.0 {
            return Err(Error::config_validation(format!(
                "input.max_weight_lb must be positive, got {}",
                self.input.max_weight_lb
            )));
        }
        if !self.input.max_height_in.is_finite() || self.input.max_height_in <= 0.0 {
            return Err(Error::config_validation(format!(
                "input.max_height_in must be positive, got {}",
                self.input.max_height_in
            )));
        }
        Ok(())
    }

    /// Get the database path, resolving the default if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// The history display limit, with 0 mapped to "unlimited".
    #[must_use]
    pub fn history_limit(&self) -> Option<usize> {
        if self.display.history_limit == 0 {
            None
        } else {
            Some(self.display.history_limit)
        }
    }
}
