use crate::error::BackendError;
use crate::local::storage::KeyValueStore;
use crate::traits::CatalogBackend;
use async_trait::async_trait;
use catalog_models::{FavoriteSet, Movie, MovieDraft, MovieId};
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct LocalBackend {
    store: KeyValueStore,
    movies_key: String,
    favorites_key: String,
    // Serializes read-modify-write cycles on the movie list
    write_lock: Mutex<()>,
}

impl LocalBackend {
    pub fn new(store: KeyValueStore, movies_key: impl Into<String>, favorites_key: impl Into<String>) -> Self {
        Self {
            store,
            movies_key: movies_key.into(),
            favorites_key: favorites_key.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }

    async fn read_movies(&self) -> Result<Vec<Movie>, BackendError> {
        let Some(raw) = self.store.get_item(&self.movies_key).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Movie>>(&raw) {
            Ok(movies) => Ok(movies),
            Err(e) => {
                warn!(
                    "Stored value under {:?} is not a movie list ({}); treating as empty",
                    self.movies_key, e
                );
                Ok(Vec::new())
            }
        }
    }

    async fn write_movies(&self, movies: &[Movie]) -> Result<(), BackendError> {
        let json = serde_json::to_string(movies).map_err(|source| BackendError::Serialize {
            what: "movie list",
            source,
        })?;
        self.store.set_item(&self.movies_key, &json).await
    }

    fn next_id(movies: &[Movie]) -> Result<MovieId, BackendError> {
        let max = movies.iter().filter_map(|m| m.id.as_number()).max().unwrap_or(0);
        max.checked_add(1)
            .map(MovieId::from_number)
            .ok_or(BackendError::IdsExhausted(max))
    }
}

#[async_trait]
impl CatalogBackend for LocalBackend {
    fn backend_name(&self) -> &str {
        "local"
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, BackendError> {
        self.read_movies().await
    }

    async fn get_movie(&self, id: &MovieId) -> Result<Option<Movie>, BackendError> {
        let movies = self.read_movies().await?;
        Ok(movies.into_iter().find(|m| &m.id == id))
    }

    async fn create_movie(&self, draft: &MovieDraft) -> Result<Movie, BackendError> {
        let _guard = self.write_lock.lock().await;
        let mut movies = self.read_movies().await?;
        let movie = draft.clone().with_id(Self::next_id(&movies)?);
        movies.push(movie.clone());
        self.write_movies(&movies).await?;
        info!("Stored movie {} locally", movie.id);
        Ok(movie)
    }

    async fn update_movie(&self, id: &MovieId, draft: &MovieDraft) -> Result<Movie, BackendError> {
        let _guard = self.write_lock.lock().await;
        let mut movies = self.read_movies().await?;
        let slot = movies
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| BackendError::NotFound(id.clone()))?;
        *slot = draft.clone().with_id(id.clone());
        let updated = slot.clone();
        self.write_movies(&movies).await?;
        Ok(updated)
    }

    async fn delete_movie(&self, id: &MovieId) -> Result<(), BackendError> {
        let _guard = self.write_lock.lock().await;
        let mut movies = self.read_movies().await?;
        let before = movies.len();
        movies.retain(|m| &m.id != id);
        if movies.len() == before {
            return Err(BackendError::NotFound(id.clone()));
        }
        self.write_movies(&movies).await
    }

    async fn load_favorites(&self) -> Result<FavoriteSet, BackendError> {
        let Some(raw) = self.store.get_item(&self.favorites_key).await? else {
            return Ok(FavoriteSet::new());
        };
        match serde_json::from_str::<FavoriteSet>(&raw) {
            Ok(favorites) => Ok(favorites),
            Err(e) => {
                warn!(
                    "Stored value under {:?} is not a favorites list ({}); treating as empty",
                    self.favorites_key, e
                );
                Ok(FavoriteSet::new())
            }
        }
    }

    async fn save_favorites(&self, favorites: &FavoriteSet) -> Result<FavoriteSet, BackendError> {
        let json = serde_json::to_string(favorites).map_err(|source| BackendError::Serialize {
            what: "favorites",
            source,
        })?;
        self.store.set_item(&self.favorites_key, &json).await?;
        Ok(favorites.clone())
    }
}
