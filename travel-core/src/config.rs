use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::provider::ServiceId;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Environment variable overriding the agents' model identifier.
pub const MODEL_ENV_VAR: &str = "TRAVEL_AGENT_MODEL";

/// Credentials and endpoint for one upstream service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    pub api_key: Option<String>,
    /// Overrides the service's default base URL.
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AgentsConfig {
    pub model: String,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self { model: DEFAULT_MODEL.to_string() }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [weather]
/// api_key = "..."
///
/// [national_parks]
/// api_key = "..."
///
/// [agents]
/// model = "gemini-2.0-flash"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub weather: ServiceConfig,
    pub national_parks: ServiceConfig,
    pub agents: AgentsConfig,
}

impl Config {
    pub fn service(&self, id: ServiceId) -> &ServiceConfig {
        match id {
            ServiceId::Weather => &self.weather,
            ServiceId::NationalParks => &self.national_parks,
        }
    }

    fn service_mut(&mut self, id: ServiceId) -> &mut ServiceConfig {
        match id {
            ServiceId::Weather => &mut self.weather,
            ServiceId::NationalParks => &mut self.national_parks,
        }
    }

    /// Returns the API key for a service. Blank keys count as missing.
    pub fn api_key(&self, id: ServiceId) -> Option<&str> {
        self.service(id).api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    pub fn is_service_configured(&self, id: ServiceId) -> bool {
        self.api_key(id).is_some()
    }

    /// Base URL for a service, without a trailing slash.
    pub fn base_url(&self, id: ServiceId) -> &str {
        self.service(id)
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| id.default_base_url())
            .trim_end_matches('/')
    }

    pub fn upsert_api_key(&mut self, id: ServiceId, api_key: String) {
        self.service_mut(id).api_key = Some(api_key);
    }

    pub fn set_base_url(&mut self, id: ServiceId, base_url: impl Into<String>) {
        self.service_mut(id).base_url = Some(base_url.into());
    }

    /// Overlay API keys and the model from an environment-style lookup.
    ///
    /// Variables that are unset or blank leave the loaded value alone.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for id in ServiceId::all() {
            if let Some(key) = lookup(id.env_var()).filter(|v| !v.trim().is_empty()) {
                debug!(service = %id, var = id.env_var(), "API key taken from environment");
                self.upsert_api_key(*id, key);
            }
        }

        if let Some(model) = lookup(MODEL_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            self.agents.model = model;
        }
    }

    /// Load the config file, then `.env`, then the process environment.
    pub fn from_environment() -> Result<Self> {
        let mut cfg = Self::load()?;

        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env file");
        }

        cfg.apply_env(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "travel-assistant", "travel-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
