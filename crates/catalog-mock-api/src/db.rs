use catalog_models::{FavoriteSet, FavoritesShape, Movie, MovieDraft, MovieId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("malformed db file {path}: {message}")]
    Malformed { path: PathBuf, message: String },
    #[error("no numeric id left after {0}")]
    IdsExhausted(u64),
}

/// On-disk layout, same as a json-server `db.json`
#[derive(Debug, Serialize, Deserialize, Default)]
struct DbFile {
    #[serde(default)]
    movies: Vec<Movie>,
    #[serde(default)]
    favorites: Value,
}

/// In-memory copy of the db file. Handlers mutate it through [`MockDb::commit`]
/// so that what is served always matches what is on disk.
#[derive(Debug, Clone)]
pub struct MockDb {
    path: Option<PathBuf>,
    movies: Vec<Movie>,
    favorites: FavoriteSet,
    favorites_shape: FavoritesShape,
}

impl MockDb {
    pub fn in_memory(movies: Vec<Movie>, favorites: FavoriteSet) -> Self {
        Self {
            path: None,
            movies,
            favorites,
            favorites_shape: FavoritesShape::default(),
        }
    }

    /// Open a db file, creating it with `seed` when it does not exist yet.
    pub async fn open(path: &Path, seed: Vec<Movie>) -> Result<Self, DbError> {
        if !path.exists() {
            info!("Creating mock db at {} with {} movies", path.display(), seed.len());
            let db = Self {
                path: Some(path.to_path_buf()),
                movies: seed,
                favorites: FavoriteSet::new(),
                favorites_shape: FavoritesShape::default(),
            };
            db.persist().await?;
            return Ok(db);
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DbError::Read { path: path.to_path_buf(), source })?;
        let file: DbFile = serde_json::from_str(&content).map_err(|e| DbError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let (favorites, favorites_shape) =
            FavoriteSet::decode(file.favorites).map_err(|e| DbError::Malformed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        debug!(
            "Loaded mock db {}: {} movies, {} favorites",
            path.display(),
            file.movies.len(),
            favorites.len()
        );

        Ok(Self {
            path: Some(path.to_path_buf()),
            movies: file.movies,
            favorites,
            favorites_shape,
        })
    }

    pub async fn persist(&self) -> Result<(), DbError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let file = DbFile {
            movies: self.movies.clone(),
            favorites: self.favorites.encode(self.favorites_shape),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| DbError::Malformed {
            path: path.clone(),
            message: e.to_string(),
        })?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| DbError::Write { path: path.clone(), source })?;
        }
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|source| DbError::Write { path: tmp.clone(), source })?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|source| DbError::Write { path: path.clone(), source })?;
        Ok(())
    }

    /// Run `change` on a copy, persist the copy and only then keep it.
    /// On any error the db is left as it was.
    pub async fn commit<T, E>(&mut self, change: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let mut next = self.clone();
        let value = change(&mut next)?;
        next.persist().await?;
        *self = next;
        Ok(value)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn movie(&self, id: &MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| &m.id == id)
    }

    pub fn insert(&mut self, draft: MovieDraft) -> Result<Movie, DbError> {
        let movie = draft.with_id(self.next_id()?);
        self.movies.push(movie.clone());
        Ok(movie)
    }

    /// `None` when the id is unknown.
    pub fn replace(&mut self, id: &MovieId, draft: MovieDraft) -> Option<Movie> {
        let slot = self.movies.iter_mut().find(|m| &m.id == id)?;
        *slot = draft.with_id(id.clone());
        Some(slot.clone())
    }

    /// Favorites are left alone, as json-server does.
    pub fn remove(&mut self, id: &MovieId) -> Option<Movie> {
        let index = self.movies.iter().position(|m| &m.id == id)?;
        Some(self.movies.remove(index))
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn favorites_shape(&self) -> FavoritesShape {
        self.favorites_shape
    }

    pub fn set_favorites(&mut self, favorites: FavoriteSet) {
        self.favorites = favorites;
    }

    fn next_id(&self) -> Result<MovieId, DbError> {
        let max = self
            .movies
            .iter()
            .filter_map(|m| m.id.as_number())
            .max()
            .unwrap_or(0);
        max.checked_add(1)
            .map(MovieId::from_number)
            .ok_or(DbError::IdsExhausted(max))
    }
}
