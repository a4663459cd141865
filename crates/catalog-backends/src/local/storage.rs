use crate::error::BackendError;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// String key/value store backed by one file per key (`<dir>/<key>.json`)
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    dir: PathBuf,
}

impl KeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<String>, BackendError> {
        let path = self.key_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Storage key {} not set", key);
                Ok(None)
            }
            Err(source) => Err(BackendError::Io { path, source }),
        }
    }

    /// Write through a temp file so a crash never leaves half a document
    pub async fn set_item(&self, key: &str, value: &str) -> Result<(), BackendError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| BackendError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.key_path(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|source| BackendError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| BackendError::Io { path, source })?;
        Ok(())
    }
}
