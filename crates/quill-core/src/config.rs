//! Configuration for quill-core
//!
//! Centralized settings for editor sessions: history bounds, autosave cadence
//! and the reading speed used for document statistics.

use quill_domain::DEFAULT_WORDS_PER_MINUTE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Editor-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Undo/redo settings
    pub history: HistoryConfig,
    /// Autosave settings
    pub autosave: AutosaveConfig,
    /// Statistics settings
    pub stats: StatsConfig,
}

/// Undo/redo configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum snapshots kept per stack. Unbounded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

/// Autosave configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveConfig {
    /// Whether dirty sessions report autosave as due
    pub enabled: bool,
    /// Quiet period after the last edit before saving, in milliseconds
    pub delay_ms: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: 3000,
        }
    }
}

/// Document statistics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Reading speed for reading-time estimates
    pub words_per_minute: u32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

impl EditorConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate configuration from a file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents)?,
            _ => Self::from_toml(&contents)?,
        };
        config.validate()?;
        tracing::debug!("Loaded editor config from {:?}", path);
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.capacity == Some(0) {
            return Err(ConfigError::OutOfRange(
                "history.capacity must be positive when set".to_string(),
            ));
        }

        if self.autosave.delay_ms == 0 {
            return Err(ConfigError::OutOfRange(
                "autosave.delay_ms must be positive".to_string(),
            ));
        }

        if self.stats.words_per_minute == 0 {
            return Err(ConfigError::OutOfRange(
                "stats.words_per_minute must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration loading or validation error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Malformed TOML
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialization failed: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Malformed JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
