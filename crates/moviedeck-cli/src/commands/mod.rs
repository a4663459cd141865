pub mod catalog;
pub mod config;
pub mod edit;
pub mod prompts;
pub mod serve;

use crate::output::Output;
use catalog_backends::create_backend;
use catalog_config::{Config, PathManager};
use catalog_core::CatalogStore;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use edit::MovieArgs;

/// Config file location: `--config` wins over the default under the base dir
pub fn config_file(config_path: Option<&Path>, paths: &PathManager) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| paths.config_file())
}

/// Load, apply env overrides and validate. A missing file means defaults.
pub fn load_config(config_path: Option<&Path>, paths: &PathManager) -> Result<Config> {
    let file = config_file(config_path, paths);
    let mut config = Config::load_or_default(&file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {:#}", file.display(), e))?;
    config.apply_env_overrides();
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration in {}: {}", file.display(), e))?;
    Ok(config)
}

/// Loaded configuration plus a store synced with the configured backend
pub struct Session {
    pub config: Config,
    pub store: CatalogStore,
}

impl Session {
    pub async fn open(config_path: Option<&Path>, output: &Output) -> Result<Self> {
        let paths = PathManager::default();
        let config = load_config(config_path, &paths)?;

        let backend = create_backend(&config, &paths)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to set up catalog backend: {}", e))?;
        tracing::debug!(backend = backend.backend_name(), "Opening catalog");

        let store = with_spinner(output, "Loading catalog...", CatalogStore::open(backend))
            .await
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

        Ok(Self { config, store })
    }
}

/// Run `task` behind a spinner on interactive terminals
pub async fn with_spinner<F: Future>(output: &Output, message: &'static str, task: F) -> F::Output {
    if !output.is_interactive() {
        return task.await;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .map(|s| s.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"))
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = task.await;
    spinner.finish_and_clear();
    result
}
