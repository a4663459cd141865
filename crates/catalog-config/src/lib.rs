pub mod config;
pub mod paths;

pub use config::{BackendConfig, BackendKind, Config, ConfigError, DisplayConfig, HttpConfig, LocalConfig, ServerConfig, API_URL_ENV};
pub use paths::{base_path_override, PathManager};

/// Held by tests that set or clear process environment variables
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
