//! Application configuration
//!
//! Loaded from `config.toml` in the per-user config directory. Every key is
//! optional; missing keys fall back to their defaults.

pub mod repository;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::import::submit::DEFAULT_BATCH_SIZE;

pub const APP_DIR: &str = "asset-import";
pub const CONFIG_FILE: &str = "config.toml";
pub const HISTORY_DB_FILE: &str = "history.db";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub import: ImportConfig,
    pub history: HistoryConfig,
}

/// Asset service connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Records per bulk-create request
    pub batch_size: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// SQLite file for import history
    pub database: Option<PathBuf>,
}

/// Per-user directory holding config and history
pub fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn default_config_path() -> PathBuf {
    app_dir().join(CONFIG_FILE)
}

impl Config {
    /// Load from `path`, or from the default location when `None`
    ///
    /// A missing file yields the defaults. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_path);

        let config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            log::debug!("Loaded config from {}", path.display());
            Self::from_toml_str(&content)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    pub fn validate(&self) -> Result<()> {
        if self.import.batch_size == 0 {
            anyhow::bail!("import.batch_size must be greater than 0");
        }
        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be greater than 0");
        }
        if let Some(url) = &self.api.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("api.base_url must start with http:// or https:// (got '{}')", url);
            }
        }
        Ok(())
    }

    /// History database location, defaulting to the app directory
    pub fn history_database(&self) -> PathBuf {
        self.history
            .database
            .clone()
            .unwrap_or_else(|| app_dir().join(HISTORY_DB_FILE))
    }

    /// Base URL of the asset service, required for anything that calls it
    pub fn require_base_url(&self) -> Result<&str> {
        self.api.base_url.as_deref().context(
            "No asset service URL configured. Set ASSET_IMPORT_API_URL, pass --api-url, \
             or add base_url under [api] in config.toml",
        )
    }
}
