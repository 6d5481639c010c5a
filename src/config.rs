//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\album-data\config.toml
//! - macOS: ~/Library/Application Support/album-data/config.toml
//! - Linux: ~/.config/album-data/config.toml
//!
//! Every section is optional; missing fields fall back to defaults.
//! Spotify credentials may also come from the `SPOTIFY_CLIENT_ID` and
//! `SPOTIFY_CLIENT_SECRET` environment variables, which win over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::providers::{lrclib, musicbrainz, spotify};

pub const CLIENT_ID_ENV: &str = "SPOTIFY_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "SPOTIFY_CLIENT_SECRET";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Pipeline scheduling and batching
    pub pipeline: PipelineConfig,

    /// Provider endpoints and request settings
    pub providers: ProvidersConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
}

impl Credentials {
    /// Spotify id and secret, environment first, then the config file.
    pub fn spotify(&self) -> Option<(String, String)> {
        let id = env_or(CLIENT_ID_ENV, &self.spotify_client_id)?;
        let secret = env_or(CLIENT_SECRET_ENV, &self.spotify_client_secret)?;
        Some((id, secret))
    }
}

/// Non-blank environment value, else the non-blank file value.
fn env_or(var: &str, file_value: &Option<String>) -> Option<String> {
    let non_blank = |s: &String| !s.trim().is_empty();
    std::env::var(var)
        .ok()
        .filter(non_blank)
        .or_else(|| file_value.clone().filter(non_blank))
}

/// Pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Fetch per-album work concurrently
    pub parallel: bool,

    /// "default", "sequential", or a worker count
    pub concurrency_strategy: String,

    /// Track ids per audio-feature request (capped by the provider)
    pub feature_batch_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            concurrency_strategy: "default".to_string(),
            feature_batch_size: spotify::FEATURE_BATCH_LIMIT,
        }
    }
}

/// Provider endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub spotify_api_url: String,
    pub spotify_accounts_url: String,

    /// Optional market (ISO 3166-1 alpha-2) for Spotify listings
    pub spotify_market: Option<String>,

    /// Album groups to list: album, single, appears_on, compilation
    pub spotify_include_groups: String,

    pub musicbrainz_url: String,
    pub lrclib_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            spotify_api_url: spotify::DEFAULT_API_URL.to_string(),
            spotify_accounts_url: spotify::DEFAULT_ACCOUNTS_URL.to_string(),
            spotify_market: None,
            spotify_include_groups: "album".to_string(),
            musicbrainz_url: musicbrainz::DEFAULT_BASE_URL.to_string(),
            lrclib_url: lrclib::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("album-data"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", path);
            config
        }
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from a specific file
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

/// Save configuration to the default location
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to a specific file
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
