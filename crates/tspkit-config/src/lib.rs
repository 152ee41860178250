//! Configuration for `tspkit` solvers.
//!
//! Loads a [`SolverConfig`] from TOML or YAML so a caller can tune k,
//! passes, the improvement threshold, and the initializer without a code
//! change.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use tspkit_config::{Initializer, SolverConfig};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     k = 3
//!     passes = 4
//!     min_cost_improvement = 1e-8
//!
//!     [initializer]
//!     type = "nearest_neighbor"
//!     start = 0
//! "#).unwrap();
//!
//! assert_eq!(config.k, 3);
//! assert_eq!(config.passes, 4);
//! assert!(matches!(config.initializer, Initializer::NearestNeighbor { start: Some(0) }));
//! ```
//!
//! Fall back to defaults when a file is missing:
//!
//! ```
//! use tspkit_config::SolverConfig;
//!
//! let config = SolverConfig::load("tspkit.toml").unwrap_or_default();
//! assert_eq!(config.k, 2);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tspkit_core::TspError;

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Which initializer a configured solver should use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Initializer {
    NearestNeighbor {
        /// Start vertex; if absent, every vertex is tried and the
        /// cheapest tour kept.
        #[serde(default)]
        start: Option<usize>,
    },
    Random {
        /// RNG seed; if absent, a fresh seed is drawn at run time.
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl Default for Initializer {
    fn default() -> Self {
        Initializer::NearestNeighbor { start: Some(0) }
    }
}

/// Solver configuration: k, number of independent passes, the minimum
/// cost-improvement threshold, and the initializer to use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverConfig {
    pub k: usize,
    pub passes: usize,
    pub min_cost_improvement: f64,
    pub initializer: Initializer,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            k: 2,
            passes: 1,
            min_cost_improvement: 1e-8,
            initializer: Initializer::default(),
        }
    }
}

impl SolverConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_yaml_str(&std::fs::read_to_string(path)?)
    }

    /// Loads from `path`, dispatching on its extension (`.toml`, `.yaml`,
    /// `.yml`); any other extension is a TOML parse attempt.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.k < 2 {
            return Err(ConfigError::Invalid(format!("k must be >= 2, got {}", self.k)));
        }
        if self.passes < 1 {
            return Err(ConfigError::Invalid(format!(
                "passes must be >= 1, got {}",
                self.passes
            )));
        }
        if self.min_cost_improvement < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_cost_improvement must be >= 0, got {}",
                self.min_cost_improvement
            )));
        }
        Ok(())
    }
}

impl From<ConfigError> for TspError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(msg) => TspError::InvalidParameter(msg),
            other => TspError::InvalidParameter(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests;
