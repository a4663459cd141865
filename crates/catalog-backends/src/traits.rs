use crate::error::BackendError;
use async_trait::async_trait;
use catalog_models::{FavoriteSet, Movie, MovieDraft, MovieId};

/// Where the catalog and the favorite set persist
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    fn backend_name(&self) -> &str;

    // Movies
    async fn list_movies(&self) -> Result<Vec<Movie>, BackendError>;
    /// `Ok(None)` when the backend does not know the id.
    async fn get_movie(&self, id: &MovieId) -> Result<Option<Movie>, BackendError>;
    /// Returns the stored movie with its assigned id.
    async fn create_movie(&self, draft: &MovieDraft) -> Result<Movie, BackendError>;
    async fn update_movie(&self, id: &MovieId, draft: &MovieDraft) -> Result<Movie, BackendError>;
    async fn delete_movie(&self, id: &MovieId) -> Result<(), BackendError>;

    // Favorites
    async fn load_favorites(&self) -> Result<FavoriteSet, BackendError>;
    /// Replaces the whole set; returns what the backend now holds.
    async fn save_favorites(&self, favorites: &FavoriteSet) -> Result<FavoriteSet, BackendError>;
}
