use crate::error::BackendError;
use crate::http::HttpBackend;
use crate::local::{KeyValueStore, LocalBackend};
use crate::traits::CatalogBackend;
use catalog_config::{BackendKind, Config, PathManager};
use std::sync::Arc;
use tracing::info;

/// Build the backend selected by `backend.kind`
pub fn create_backend(config: &Config, paths: &PathManager) -> Result<Arc<dyn CatalogBackend>, BackendError> {
    match config.backend.kind {
        BackendKind::Http => {
            let backend = HttpBackend::new(&config.http)?;
            info!("Using HTTP backend at {}", config.http.base_url);
            Ok(Arc::new(backend))
        }
        BackendKind::Local => {
            let dir = config
                .local
                .storage_dir
                .clone()
                .unwrap_or_else(|| paths.storage_dir());
            info!("Using local storage backend in {}", dir.display());
            Ok(Arc::new(LocalBackend::new(
                KeyValueStore::new(dir),
                config.local.movies_key.clone(),
                config.local.favorites_key.clone(),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_selects_backend() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path());

        let mut config = Config::default();
        let backend = create_backend(&config, &paths).unwrap();
        assert_eq!(backend.backend_name(), "http");

        config.backend.kind = BackendKind::Local;
        let backend = create_backend(&config, &paths).unwrap();
        assert_eq!(backend.backend_name(), "local");
    }
}
