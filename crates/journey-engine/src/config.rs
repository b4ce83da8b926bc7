//! Configuration for the journal.
//!
//! Settings live in `config.json` inside the data directory. Every field has
//! a default, so a missing or partial file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::export::DEFAULT_WRAP_WIDTH;
use crate::i18n::Locale;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "JOURNEY_HOME";

/// Data directory used when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = ".journey";

/// Config file name inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// UI language.
    #[serde(default)]
    pub locale: Locale,

    /// Where exports are written. Defaults to the current directory.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Wrap width for descriptions in exported documents.
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
}

fn default_wrap_width() -> usize {
    DEFAULT_WRAP_WIDTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            export_dir: None,
            wrap_width: default_wrap_width(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration, using defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Export directory, falling back to `cwd`.
    pub fn export_dir_or(&self, cwd: &Path) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| cwd.to_path_buf())
    }
}

/// Resolve the data directory: explicit value, then `JOURNEY_HOME`, then
/// `.journey` under `cwd`.
pub fn resolve_data_dir(explicit: Option<&Path>, env_value: Option<&str>, cwd: &Path) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    match env_value {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => cwd.join(DEFAULT_DATA_DIR),
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}
