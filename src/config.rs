//! Configuration for boothmark
//!
//! JSON file under the user config dir. Missing fields take defaults; a
//! missing file is created with defaults on first run. Environment variables
//! and CLI flags override file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::config::{
    APP_DIR, DATA_DIR_ENV, DEFAULT_SHARE_BASE_URL, FILENAME, LOCATION_FILENAME, LOG_LEVEL_ENV,
    STORAGE_FILENAME,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where the list store and location live (default: user data dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Venue dataset JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,

    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_share_base_url() -> String {
    DEFAULT_SHARE_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            dataset: None,
            share_base_url: default_share_base_url(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push(FILENAME);
        path
    }

    /// Load from the default path, creating it with defaults if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, creating default config at {:?}", config_path);
            let config = Config::default();
            if let Err(e) = config.save_to(config_path) {
                // Read-only config dirs still get a working default
                warn!(error = ?e, "Failed to write default config");
            }
            return Ok(config.with_env_overrides());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {:?}", config_path))?;

        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON from {:?}", config_path))?;

        Ok(config.with_env_overrides())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;

        fs::write(config_path, json)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        info!("Saved config to {:?}", config_path);
        Ok(())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                self.data_dir = Some(PathBuf::from(dir));
            }
        }
        if let Ok(level) = env::var(LOG_LEVEL_ENV) {
            if !level.is_empty() {
                self.log_level = level;
            }
        }
        self
    }

    /// Data directory after overrides, falling back to the user data dir
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push(APP_DIR);
            path
        })
    }

    pub fn storage_path(&self) -> PathBuf {
        self.resolved_data_dir().join(STORAGE_FILENAME)
    }

    pub fn location_path(&self) -> PathBuf {
        self.resolved_data_dir().join(LOCATION_FILENAME)
    }
}
