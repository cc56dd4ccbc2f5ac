use crate::paths::AppDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const CURRENT_CONFIG_VERSION: u32 = 1;

/// Longest load wait accepted from configuration, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Upper bound the web search API accepts for `limit`.
pub const MAX_SEARCH_RESULTS: u32 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_config_version")]
    pub config_version: u32,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub spotify: SpotifyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            logging: LoggingConfig::default(),
            spotify: SpotifyConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: LogLevel,
    #[serde(default = "default_max_log_files")]
    pub max_log_files: usize,
    #[serde(default = "default_stdout_enabled")]
    pub stdout: bool,
    #[serde(default)]
    pub file_name: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_log_files: default_max_log_files(),
            stdout: default_stdout_enabled(),
            file_name: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Options recognized by the Spotify library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyConfig {
    /// Seconds to wait for a native object to load.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_search_count")]
    pub search_album_count: u32,
    #[serde(default = "default_search_count")]
    pub search_artist_count: u32,
    #[serde(default = "default_search_count")]
    pub search_track_count: u32,
    /// ISO country codes offered under the country toplist folder.
    #[serde(default)]
    pub toplist_countries: Vec<String>,
    #[serde(default = "default_web_api_url")]
    pub web_api_url: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            search_album_count: default_search_count(),
            search_artist_count: default_search_count(),
            search_track_count: default_search_count(),
            toplist_countries: Vec::new(),
            web_api_url: default_web_api_url(),
            access_token: None,
        }
    }
}

impl SpotifyConfig {
    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Per-category search result caps.
    pub fn search_caps(&self) -> SearchCaps {
        SearchCaps {
            albums: self.search_album_count,
            artists: self.search_artist_count,
            tracks: self.search_track_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchCaps {
    pub albums: u32,
    pub artists: u32,
    pub tracks: u32,
}

/// The `limit` sent upstream, derived from the largest category cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimit {
    pub limit: u32,
    pub clamped: bool,
}

impl SearchCaps {
    pub fn request_limit(&self) -> SearchLimit {
        let wanted = self.albums.max(self.artists).max(self.tracks);
        if wanted > MAX_SEARCH_RESULTS {
            SearchLimit {
                limit: MAX_SEARCH_RESULTS,
                clamped: true,
            }
        } else {
            SearchLimit {
                limit: wanted,
                clamped: false,
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("config validation failed: {0}")]
    Validation(ValidationError),
    #[error("failed to prepare configuration directories: {0}")]
    Directories(#[from] crate::paths::DirsError),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("unsupported config_version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("spotify.timeout must be at least one second")]
    ZeroTimeout,
    #[error("spotify.timeout must be at most {max} seconds, got {found}")]
    TimeoutTooLarge { found: u64, max: u64 },
}

impl Config {
    pub fn load_or_default(dirs: &AppDirs) -> Result<Self, ConfigError> {
        dirs.ensure_exists()?;
        let path = Self::config_path(dirs);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        config.validate().map_err(ConfigError::Validation)?;
        Ok(config)
    }

    pub fn config_path(dirs: &AppDirs) -> PathBuf {
        dirs.config_dir().join("config.toml")
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.config_version != CURRENT_CONFIG_VERSION {
            return Err(ValidationError::UnsupportedVersion {
                found: self.config_version,
                expected: CURRENT_CONFIG_VERSION,
            });
        }
        if self.spotify.timeout == 0 {
            return Err(ValidationError::ZeroTimeout);
        }
        if self.spotify.timeout > MAX_TIMEOUT_SECS {
            return Err(ValidationError::TimeoutTooLarge {
                found: self.spotify.timeout,
                max: MAX_TIMEOUT_SECS,
            });
        }
        Ok(())
    }
}

fn default_config_version() -> u32 {
    CURRENT_CONFIG_VERSION
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

fn default_max_log_files() -> usize {
    7
}

fn default_stdout_enabled() -> bool {
    true
}

fn default_timeout() -> u64 {
    10
}

fn default_search_count() -> u32 {
    20
}

fn default_web_api_url() -> String {
    "https://api.spotify.com/v1/".into()
}
