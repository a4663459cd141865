use catalog_models::{DurationStyle, FavoritesShape, SortKey};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that replaces `http.base_url`
pub const API_URL_ENV: &str = "MOVIEDECK_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub local: LocalConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// REST API (json-server compatible)
    #[default]
    Http,
    /// Two JSON keys on disk
    Local,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_movies_path")]
    pub movies_path: String,
    #[serde(default = "default_favorites_path")]
    pub favorites_path: String,
    /// Shape used when writing the favorites document (any shape is accepted on read)
    #[serde(default)]
    pub favorites_shape: FavoritesShape,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalConfig {
    /// Defaults to `<data dir>/storage`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    #[serde(default = "default_movies_key")]
    pub movies_key: String,
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_max_stars")]
    pub max_stars: u8,
    #[serde(default)]
    pub duration_style: DurationStyle,
    #[serde(default)]
    pub default_sort: SortKey,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Defaults to `<data dir>/db.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("http.base_url must start with http:// or https:// (got {0:?})")]
    InvalidBaseUrl(String),
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    #[error("http.timeout_secs must be greater than zero")]
    ZeroTimeout,
    #[error("display.max_stars must be between 1 and 10 (got {0})")]
    MaxStarsOutOfRange(u8),
    #[error("local.movies_key and local.favorites_key must differ")]
    SharedStorageKey,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_movies_path() -> String {
    "movies".to_string()
}

fn default_favorites_path() -> String {
    "favorites".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_movies_key() -> String {
    "movies".to_string()
}

fn default_favorites_key() -> String {
    "favorites".to_string()
}

fn default_max_stars() -> u8 {
    5
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            movies_path: default_movies_path(),
            favorites_path: default_favorites_path(),
            favorites_shape: FavoritesShape::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            movies_key: default_movies_key(),
            favorites_key: default_favorites_key(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_stars: default_max_stars(),
            duration_style: DurationStyle::default(),
            default_sort: SortKey::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            db_file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                debug!("Using API base URL from {}", API_URL_ENV);
                self.http.base_url = url.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.http.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.http.base_url.clone()));
        }
        if self.http.movies_path.trim_matches('/').is_empty() {
            return Err(ConfigError::Empty("http.movies_path"));
        }
        if self.http.favorites_path.trim_matches('/').is_empty() {
            return Err(ConfigError::Empty("http.favorites_path"));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        if self.local.movies_key.trim().is_empty() {
            return Err(ConfigError::Empty("local.movies_key"));
        }
        if self.local.favorites_key.trim().is_empty() {
            return Err(ConfigError::Empty("local.favorites_key"));
        }
        if self.local.movies_key == self.local.favorites_key {
            return Err(ConfigError::SharedStorageKey);
        }

        if !(1..=10).contains(&self.display.max_stars) {
            return Err(ConfigError::MaxStarsOutOfRange(self.display.max_stars));
        }

        if self.server.bind.trim().is_empty() {
            return Err(ConfigError::Empty("server.bind"));
        }

        Ok(())
    }
}
