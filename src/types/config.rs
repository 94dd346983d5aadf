//! Configuration for Arc Screener.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ScreenerResult;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "arc-screener.toml";

/// Main configuration for Arc Screener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Scoring service settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Durable store settings.
    #[serde(default)]
    pub store: StoreConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Scoring service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the screening/analysis service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout (in seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Symbols to screen. Empty means the service's default universe.
    #[serde(default)]
    pub tickers: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            tickers: Vec::new(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    60
}

/// Backend used for the persisted screening results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// SQLite file on disk.
    Sqlite,
    /// Process memory only; nothing survives a restart.
    Memory,
}

/// Durable store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_backend")]
    pub backend: StoreBackend,

    /// SQLite database path.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_store_path(),
        }
    }
}

fn default_backend() -> StoreBackend {
    StoreBackend::Sqlite
}

fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("arc-screener").join("store.db"))
        .unwrap_or_else(|| PathBuf::from(".arc-screener/store.db"))
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> ScreenerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ScreenerResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            service: ServiceConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
