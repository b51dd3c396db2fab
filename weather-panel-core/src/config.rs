use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::Coordinates;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/";

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const BASE_URL_ENV: &str = "OPENWEATHER_API_BASE_URL";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5/"
/// latitude = 59.91
/// longitude = 10.75
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,

    /// Prefix the `weather` endpoint is appended to; expected to end with `/`.
    pub base_url: Option<String>,

    /// Optional fixed position used instead of IP geolocation.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Config {
    /// Load config from disk and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_overrides(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-panel", "weather-panel")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay values from the environment; `lookup` is `std::env::var` outside tests.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.base_url = Some(url);
        }
    }

    /// API key to send as `appid`, empty when none is configured. Missing
    /// keys are not rejected here, the provider answers 401 instead.
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    /// Store a key entered by the user; blank input clears it.
    pub fn set_api_key(&mut self, key: &str) {
        let key = key.trim();
        self.api_key = (!key.is_empty()).then(|| key.to_string());
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Fixed coordinates, when both halves are configured.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}
