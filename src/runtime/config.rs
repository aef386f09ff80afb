//! Configuration loading from TOML files.
//!
//! The config file is selected via:
//! 1. `CONFIG_FILE` environment variable
//! 2. Default: `config/tracking.toml`
//!
//! Every section and key is optional; missing ones take the defaults below.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

pub const CONFIG_FILE_ENV: &str = "CONFIG_FILE";
pub const DEFAULT_CONFIG_PATH: &str = "config/tracking.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Parcel actor mailbox capacity.
    pub buffer_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PointsConfig {
    /// Point actor mailbox capacity.
    pub buffer_size: usize,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

fn default_buffer_size() -> usize {
    32
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub store: StoreConfig,
    pub points: PointsConfig,
    pub logging: LoggingConfig,
}

impl TrackingConfig {
    /// `CONFIG_FILE` if set, otherwise the default path.
    pub fn resolve_config_path() -> PathBuf {
        env::var(CONFIG_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: TrackingConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Tries the file first, falls back to defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Using default configuration");
                Self::default()
            }
        }
    }

    pub fn load() -> Self {
        Self::load_from_path(Self::resolve_config_path())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // tokio's mpsc::channel panics on a zero capacity.
        if self.store.buffer_size == 0 {
            return Err(ConfigError::Invalid("store.buffer_size must be > 0".into()));
        }
        if self.points.buffer_size == 0 {
            return Err(ConfigError::Invalid("points.buffer_size must be > 0".into()));
        }
        Ok(())
    }
}
