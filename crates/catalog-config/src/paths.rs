use anyhow::Result;
use std::path::{Path, PathBuf};

const BASE_PATH_ENV: &str = "MOVIEDECK_BASE_PATH";

/// Base directory override from `MOVIEDECK_BASE_PATH`, if set
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var_os(BASE_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("moviedeck");

        Ok(Self::from_base(base_dir))
    }

    /// Config files at the base level, data and logs in subdirectories
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Where the local backend keeps its key files
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.join("storage")
    }

    /// Database file served by `moviedeck serve`
    pub fn mock_db_file(&self) -> PathBuf {
        self.data_dir.join("db.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("moviedeck.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        std::fs::create_dir_all(self.storage_dir())?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        // Platform config dir (e.g. ~/.config/moviedeck on Linux), falling back to cwd
        Self::new().unwrap_or_else(|_| Self::from_base(".moviedeck"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::from_base("/srv/moviedeck");
        assert_eq!(paths.config_file(), PathBuf::from("/srv/moviedeck/config.toml"));
        assert_eq!(paths.storage_dir(), PathBuf::from("/srv/moviedeck/data/storage"));
        assert_eq!(paths.mock_db_file(), PathBuf::from("/srv/moviedeck/data/db.json"));
        assert_eq!(paths.log_file(), PathBuf::from("/srv/moviedeck/logs/moviedeck.log"));
    }

    #[test]
    fn test_base_path_env_override() {
        let _env = crate::ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();

        std::env::set_var(BASE_PATH_ENV, dir.path());
        assert_eq!(base_path_override(), Some(dir.path().to_path_buf()));
        let paths = PathManager::default();
        assert_eq!(paths.config_dir(), dir.path());
        assert_eq!(paths.config_file(), dir.path().join("config.toml"));
        assert_eq!(paths.mock_db_file(), dir.path().join("data/db.json"));

        std::env::set_var(BASE_PATH_ENV, "");
        assert_eq!(base_path_override(), None);

        std::env::remove_var(BASE_PATH_ENV);
        assert_eq!(base_path_override(), None);
        assert_ne!(PathManager::default().config_dir(), dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().join("md"));
        paths.ensure_directories().unwrap();
        assert!(paths.storage_dir().is_dir());
        assert!(paths.log_dir().is_dir());
    }
}
