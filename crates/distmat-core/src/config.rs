//! Converter configuration.
//!
//! Provides configuration file support via `distmat.toml`, environment
//! variables and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (CLI flags)
//! 2. Environment variables (`DISTMAT_*`, nested keys joined by `__`)
//! 3. Configuration file (`distmat.toml`)
//! 4. Default values (the fixed input and output paths)

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::parser::ParseOptions;
use crate::storage::{OutputFormat, OutputOptions};

/// Default input: ELKI distance matrix of the 20 Newsgroups corpus.
pub const DEFAULT_INPUT_PATH: &str = "20NG/elki_distance_matrix.txt";

/// Default output record path.
pub const DEFAULT_OUTPUT_PATH: &str = "20ng_entity_graph_with_tfidf_NVS.p";

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "distmat.toml";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },

    /// Failed to render configuration.
    #[error("Failed to serialize configuration: {0}")]
    SerializeError(String),
}

/// Input section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Distance matrix text file.
    pub path: PathBuf,
    /// Reject lines with more than three fields.
    pub strict_fields: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_INPUT_PATH),
            strict_fields: false,
        }
    }
}

/// Output section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Record file to create or overwrite.
    pub path: PathBuf,
    /// Encoding: `bincode` or `json`.
    pub format: OutputFormat,
    /// Write through a temp file and rename.
    pub atomic: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            format: OutputFormat::Bincode,
            atomic: true,
        }
    }
}

/// Logging section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Input configuration.
    pub input: InputConfig,
    /// Output configuration.
    pub output: OutputConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl ConverterConfig {
    /// Loads configuration from `distmat.toml` and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(DEFAULT_CONFIG_FILE)
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("DISTMAT_").split("__"))
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str))
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "input.path".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "output.path".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.input.path == self.output.path {
            return Err(ConfigError::InvalidValue {
                key: "output.path".to_string(),
                message: format!(
                    "'{}' would overwrite the input file",
                    self.output.path.display()
                ),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, LOG_LEVELS
                ),
            });
        }

        Ok(())
    }

    /// Parser options derived from the input section.
    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict_fields: self.input.strict_fields,
        }
    }

    /// Writer options derived from the output section.
    #[must_use]
    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            format: self.output.format,
            atomic: self.output.atomic,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
