use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::storage::FileStorage;
use crate::watchlist::DEFAULT_STORAGE_KEY;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the watchlist snapshot lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage directory (default: `data_dir()/pawhaven/storage`).
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Key holding the watchlist snapshot (default: "pawhaven-watchlist").
    #[serde(default = "default_storage_key")]
    pub key: String,
}

/// Log output settings. `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "warn" or "pawhaven=debug" (default: "warn").
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl StorageConfig {
    /// Configured directory, or the platform default.
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(FileStorage::default_root)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: default_storage_key(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
