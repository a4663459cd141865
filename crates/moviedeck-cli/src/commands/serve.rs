use super::load_config;
use crate::output::Output;
use catalog_config::PathManager;
use catalog_mock_api::{seed_movies, serve, MockApiState, MockDb};
use color_eyre::eyre::Context;
use color_eyre::Result;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tracing::info;

pub async fn run_serve(
    bind: Option<String>,
    db: Option<PathBuf>,
    config_path: Option<&Path>,
    output: &Output,
) -> Result<()> {
    let paths = PathManager::default();
    let config = load_config(config_path, &paths)?;

    let bind = bind.unwrap_or(config.server.bind);
    let db_file = db
        .or(config.server.db_file)
        .unwrap_or_else(|| paths.mock_db_file());
    if let Some(parent) = db_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
    }

    let db = MockDb::open(&db_file, seed_movies())
        .await
        .wrap_err_with(|| format!("Failed to open mock db {}", db_file.display()))?;
    info!(
        movies = db.movies().len(),
        favorites = db.favorites().len(),
        "Mock db ready"
    );

    let listener = TcpListener::bind(bind.as_str())
        .await
        .wrap_err_with(|| format!("Failed to bind {}", bind))?;
    let addr = listener.local_addr()?;

    output.success(format!("Serving {} on http://{}", db_file.display(), addr));
    output.info("Press Ctrl+C to stop");

    tokio::select! {
        result = serve(listener, MockApiState::new(db)) => {
            result.map_err(|e| color_eyre::eyre::eyre!("{:#}", e))?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down mock API");
        }
    }
    Ok(())
}
