use crate::errors::{SiteError, SiteResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application name used for config and cache directories
pub const APP_NAME: &str = "momentum";

/// Prefix for environment variable overrides, e.g. `MOMENTUM_BASE_URL`
pub const ENV_PREFIX: &str = "MOMENTUM";

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_CHAT_URL: &str = "ws://localhost:5000/chat";
const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 1000;

/// Configuration for the site client
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL of the site, used for API calls and form posts
    pub base_url: Option<String>,
    /// WebSocket URL of the chat namespace
    pub chat_url: Option<String>,
    /// CSRF token sent as `X-CSRFToken` on mutating requests
    pub csrf_token: Option<String>,
    pub log_level: Option<String>,
    /// Directory holding form drafts
    pub draft_dir: Option<PathBuf>,
    pub autosave_delay_ms: Option<u64>,
}

impl SiteConfig {
    /// Built-in defaults, the lowest configuration layer
    pub fn defaults() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            chat_url: Some(DEFAULT_CHAT_URL.to_string()),
            csrf_token: None,
            log_level: Some("info".to_string()),
            draft_dir: dirs::cache_dir().map(|dir| dir.join(APP_NAME).join("drafts")),
            autosave_delay_ms: Some(DEFAULT_AUTOSAVE_DELAY_MS),
        }
    }

    /// Loads the layered configuration: defaults, then the default config file
    /// (if present), then `MOMENTUM_*` environment variables.
    pub fn load() -> SiteResult<Self> {
        dotenvy::dotenv().ok();
        let path = get_default_config_file(APP_NAME)?;
        Self::load_layered(Some(&path))
    }

    /// Same as [`SiteConfig::load`] but with an explicit config file.
    pub fn load_layered(path: Option<&Path>) -> SiteResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            debug!("Reading configuration layer from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        );

        let layer: Self = builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| SiteError::ConfigError(format!("Failed to load configuration: {}", e)))?;

        Ok(Self::defaults().merge(&layer))
    }

    /// Loads configuration from a file if it exists, otherwise returns the defaults
    pub fn load_from_file(path: &Path) -> SiteResult<Self> {
        if !path.exists() {
            return Ok(Self::defaults());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            SiteError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            SiteError::ConfigError(format!("Failed to parse config file: {}", e))
        })?;

        Ok(Self::defaults().merge(&config))
    }

    /// Saves configuration to a file
    pub fn save_to_file(&self, path: &Path) -> SiteResult<()> {
        let content = toml::to_string(self).map_err(|e| {
            SiteError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SiteError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        fs::write(path, content).map_err(|e| {
            SiteError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            base_url: other.base_url.clone().or_else(|| self.base_url.clone()),
            chat_url: other.chat_url.clone().or_else(|| self.chat_url.clone()),
            csrf_token: other.csrf_token.clone().or_else(|| self.csrf_token.clone()),
            log_level: other.log_level.clone().or_else(|| self.log_level.clone()),
            draft_dir: other.draft_dir.clone().or_else(|| self.draft_dir.clone()),
            autosave_delay_ms: other.autosave_delay_ms.or(self.autosave_delay_ms),
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn chat_url(&self) -> &str {
        self.chat_url.as_deref().unwrap_or(DEFAULT_CHAT_URL)
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms.unwrap_or(DEFAULT_AUTOSAVE_DELAY_MS))
    }

    /// Resolves the draft directory, falling back to the system temp dir
    pub fn draft_dir(&self) -> PathBuf {
        self.draft_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(APP_NAME).join("drafts"))
    }
}

/// Helper function to get default config directory
pub fn get_default_config_dir(app_name: &str) -> SiteResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        SiteError::ConfigError("Could not determine home directory".to_string())
    })?;

    Ok(home_dir.join(".config").join(app_name))
}

/// Helper function to get default config file path
pub fn get_default_config_file(app_name: &str) -> SiteResult<PathBuf> {
    let config_dir = get_default_config_dir(app_name)?;
    Ok(config_dir.join("config.toml"))
}
