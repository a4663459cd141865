use crate::error::StoreError;
use catalog_backends::CatalogBackend;
use catalog_models::{CatalogStats, FavoriteSet, Movie, MovieDraft, MovieId};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Current catalog and favorite set, kept in sync with a backend
///
/// State is published through watch channels so views can re-derive on
/// change. Every mutation goes to the backend first; local state only
/// moves once the backend has accepted it, so a failed call leaves the
/// previous state in place.
pub struct CatalogStore {
    backend: Arc<dyn CatalogBackend>,
    movies: watch::Sender<Vec<Movie>>,
    favorites: watch::Sender<FavoriteSet>,
}

impl CatalogStore {
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        let (movies, _) = watch::channel(Vec::new());
        let (favorites, _) = watch::channel(FavoriteSet::new());
        Self {
            backend,
            movies,
            favorites,
        }
    }

    /// Create a store and load both collections
    pub async fn open(backend: Arc<dyn CatalogBackend>) -> Result<Self, StoreError> {
        let store = Self::new(backend);
        store.load().await?;
        Ok(store)
    }

    pub fn backend_name(&self) -> &str {
        self.backend.backend_name()
    }

    /// Fetch movies and favorites. A favorites failure degrades to an empty set.
    pub async fn load(&self) -> Result<(), StoreError> {
        let movies = self.backend.list_movies().await.map_err(|e| {
            error!("Failed to load movies from {}: {}", self.backend_name(), e);
            StoreError::new("loading movies", e)
        })?;
        info!("Loaded {} movies", movies.len());
        self.movies.send_replace(movies);

        match self.backend.load_favorites().await {
            Ok(favorites) => {
                debug!("Loaded {} favorites", favorites.len());
                self.favorites.send_replace(favorites);
            }
            Err(e) => {
                warn!("Failed to load favorites, starting with none: {}", e);
                self.favorites.send_replace(FavoriteSet::new());
            }
        }
        Ok(())
    }

    pub fn movies(&self) -> Vec<Movie> {
        self.movies.borrow().clone()
    }

    pub fn subscribe_movies(&self) -> watch::Receiver<Vec<Movie>> {
        self.movies.subscribe()
    }

    pub fn favorites(&self) -> FavoriteSet {
        self.favorites.borrow().clone()
    }

    pub fn subscribe_favorites(&self) -> watch::Receiver<FavoriteSet> {
        self.favorites.subscribe()
    }

    /// Lookup in the loaded collection only
    pub fn find_movie(&self, id: &MovieId) -> Option<Movie> {
        self.movies.borrow().iter().find(|m| &m.id == id).cloned()
    }

    /// Ask the backend for a single movie, falling back to the loaded copy
    /// when the backend cannot be reached.
    pub async fn get_movie(&self, id: &MovieId) -> Option<Movie> {
        match self.backend.get_movie(id).await {
            Ok(movie) => movie,
            Err(e) => {
                error!("Failed to fetch movie {}: {}", id, e);
                self.find_movie(id)
            }
        }
    }

    pub async fn add_movie(&self, draft: MovieDraft) -> Result<Movie, StoreError> {
        let movie = self.backend.create_movie(&draft).await.map_err(|e| {
            error!("Failed to add movie {:?}: {}", draft.title, e);
            StoreError::new("adding movie", e)
        })?;

        self.movies.send_modify(|movies| movies.push(movie.clone()));
        info!("Added movie {} ({})", movie.id, movie.title);
        Ok(movie)
    }

    pub async fn update_movie(&self, id: &MovieId, draft: MovieDraft) -> Result<Movie, StoreError> {
        let movie = self.backend.update_movie(id, &draft).await.map_err(|e| {
            error!("Failed to update movie {}: {}", id, e);
            StoreError::new("updating movie", e)
        })?;

        let stored = movie.clone();
        self.movies.send_if_modified(|movies| {
            match movies.iter_mut().find(|m| &m.id == id) {
                Some(slot) => {
                    *slot = stored;
                    true
                }
                None => false,
            }
        });
        info!("Updated movie {}", id);
        Ok(movie)
    }

    /// Delete a movie and drop it from the favorites if it was one
    pub async fn delete_movie(&self, id: &MovieId) -> Result<(), StoreError> {
        self.backend.delete_movie(id).await.map_err(|e| {
            error!("Failed to delete movie {}: {}", id, e);
            StoreError::new("deleting movie", e)
        })?;

        self.movies.send_modify(|movies| movies.retain(|m| &m.id != id));
        info!("Deleted movie {}", id);

        if self.is_favorite(id) {
            // The movie is gone either way; a stale favorite id is harmless
            if let Err(e) = self.toggle_favorite(id).await {
                warn!("Movie {} deleted but still listed as favorite: {}", id, e);
            }
        }
        Ok(())
    }

    pub fn is_favorite(&self, id: &MovieId) -> bool {
        self.favorites.borrow().contains(id)
    }

    /// Flip membership of `id`; returns whether it is now a favorite.
    pub async fn toggle_favorite(&self, id: &MovieId) -> Result<bool, StoreError> {
        let next = self.favorites.borrow().toggled(id);
        let saved = self.backend.save_favorites(&next).await.map_err(|e| {
            error!("Failed to update favorites: {}", e);
            StoreError::new("updating favorites", e)
        })?;

        let now_favorite = saved.contains(id);
        self.favorites.send_replace(saved);
        debug!("Movie {} favorite: {}", id, now_favorite);
        Ok(now_favorite)
    }

    /// Favorite movies in collection order
    pub fn favorite_movies(&self) -> Vec<Movie> {
        let favorites = self.favorites.borrow();
        self.movies
            .borrow()
            .iter()
            .filter(|m| favorites.contains(&m.id))
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats::compute(&self.movies.borrow(), &self.favorites.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog_backends::BackendError;
    use catalog_models::MovieKind;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// In-memory backend whose calls can be made to fail on demand
    #[derive(Default)]
    struct FakeBackend {
        movies: Mutex<Vec<Movie>>,
        favorites: Mutex<FavoriteSet>,
        failing: AtomicBool,
        favorites_unavailable: bool,
    }

    impl FakeBackend {
        fn with_movies(movies: Vec<Movie>) -> Self {
            Self {
                movies: Mutex::new(movies),
                ..Self::default()
            }
        }

        fn fail(&self, on: bool) {
            self.failing.store(on, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), BackendError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(BackendError::Status {
                    url: "fake://".to_string(),
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CatalogBackend for FakeBackend {
        fn backend_name(&self) -> &str {
            "fake"
        }

        async fn list_movies(&self) -> Result<Vec<Movie>, BackendError> {
            self.check()?;
            Ok(self.movies.lock().unwrap().clone())
        }

        async fn get_movie(&self, id: &MovieId) -> Result<Option<Movie>, BackendError> {
            self.check()?;
            Ok(self.movies.lock().unwrap().iter().find(|m| &m.id == id).cloned())
        }

        async fn create_movie(&self, draft: &MovieDraft) -> Result<Movie, BackendError> {
            self.check()?;
            let mut movies = self.movies.lock().unwrap();
            let movie = draft.clone().with_id(MovieId::from_number(movies.len() as u64 + 100));
            movies.push(movie.clone());
            Ok(movie)
        }

        async fn update_movie(&self, id: &MovieId, draft: &MovieDraft) -> Result<Movie, BackendError> {
            self.check()?;
            Ok(draft.clone().with_id(id.clone()))
        }

        async fn delete_movie(&self, id: &MovieId) -> Result<(), BackendError> {
            self.check()?;
            self.movies.lock().unwrap().retain(|m| &m.id != id);
            Ok(())
        }

        async fn load_favorites(&self) -> Result<FavoriteSet, BackendError> {
            self.check()?;
            if self.favorites_unavailable {
                return Err(BackendError::Status {
                    url: "fake://favorites".to_string(),
                    status: 404,
                    body: String::new(),
                });
            }
            Ok(self.favorites.lock().unwrap().clone())
        }

        async fn save_favorites(&self, favorites: &FavoriteSet) -> Result<FavoriteSet, BackendError> {
            self.check()?;
            *self.favorites.lock().unwrap() = favorites.clone();
            Ok(favorites.clone())
        }
    }

    fn movie(id: u64, title: &str) -> Movie {
        MovieDraft {
            title: title.to_string(),
            year: 2000 + id as u32,
            genre: vec!["Drama".to_string()],
            rating: 7.0,
            poster: String::new(),
            synopsis: String::new(),
            cast: Vec::new(),
            kind: MovieKind::Movie,
            duration: None,
        }
        .with_id(MovieId::from_number(id))
    }

    async fn store_with(backend: FakeBackend) -> (Arc<FakeBackend>, CatalogStore) {
        let backend = Arc::new(backend);
        let store = CatalogStore::open(backend.clone()).await.unwrap();
        (backend, store)
    }

    #[tokio::test]
    async fn test_load_degrades_missing_favorites() {
        let backend = FakeBackend {
            favorites_unavailable: true,
            ..FakeBackend::with_movies(vec![movie(1, "A")])
        };
        let (_, store) = store_with(backend).await;
        assert_eq!(store.movies().len(), 1);
        assert!(store.favorites().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_favorite_flips_membership() {
        let (backend, store) = store_with(FakeBackend::with_movies(vec![movie(1, "A")])).await;
        let id = MovieId::from_number(1);
        let mut receiver = store.subscribe_favorites();

        assert!(store.toggle_favorite(&id).await.unwrap());
        assert!(receiver.has_changed().unwrap());
        assert!(receiver.borrow_and_update().contains(&id));
        assert!(store.is_favorite(&id));
        assert!(backend.favorites.lock().unwrap().contains(&id));
        assert_eq!(store.favorite_movies().len(), 1);

        assert!(!store.toggle_favorite(&MovieId::new("1").unwrap()).await.unwrap());
        assert!(!store.is_favorite(&id));
        assert!(store.favorite_movies().is_empty());
    }

    #[tokio::test]
    async fn test_failed_toggle_leaves_state() {
        let (backend, store) = store_with(FakeBackend::with_movies(vec![movie(1, "A")])).await;
        let id = MovieId::from_number(1);

        let receiver = store.subscribe_favorites();

        backend.fail(true);
        assert!(store.toggle_favorite(&id).await.is_err());
        assert!(!store.is_favorite(&id));
        assert!(!receiver.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_add_update_delete() {
        let (_, store) = store_with(FakeBackend::with_movies(vec![movie(1, "A")])).await;
        let mut receiver = store.subscribe_movies();

        let added = store.add_movie(movie(0, "B").to_draft()).await.unwrap();
        assert!(receiver.has_changed().unwrap());
        receiver.borrow_and_update();
        assert_eq!(store.movies().len(), 2);

        let mut draft = added.to_draft();
        draft.title = "B2".to_string();
        store.update_movie(&added.id, draft).await.unwrap();
        assert_eq!(store.find_movie(&added.id).unwrap().title, "B2");

        store.toggle_favorite(&added.id).await.unwrap();
        store.delete_movie(&added.id).await.unwrap();
        assert!(store.find_movie(&added.id).is_none());
        assert!(!store.is_favorite(&added.id));
    }

    #[tokio::test]
    async fn test_failed_mutations_leave_state() {
        let (backend, store) = store_with(FakeBackend::with_movies(vec![movie(1, "A")])).await;
        let id = MovieId::from_number(1);
        backend.fail(true);

        assert!(store.add_movie(movie(0, "B").to_draft()).await.is_err());
        let mut draft = movie(1, "A").to_draft();
        draft.title = "changed".to_string();
        assert!(store.update_movie(&id, draft).await.is_err());
        assert!(store.delete_movie(&id).await.is_err());

        assert_eq!(store.movies(), vec![movie(1, "A")]);
    }

    #[tokio::test]
    async fn test_get_movie_falls_back_to_loaded_copy() {
        let (backend, store) = store_with(FakeBackend::with_movies(vec![movie(1, "A")])).await;
        backend.fail(true);
        let found = store.get_movie(&MovieId::from_number(1)).await;
        assert_eq!(found.map(|m| m.title), Some("A".to_string()));
        assert!(store.get_movie(&MovieId::from_number(2)).await.is_none());
    }

    #[tokio::test]
    async fn test_open_fails_when_movies_unavailable() {
        let backend = FakeBackend::default();
        backend.fail(true);
        let result = CatalogStore::open(Arc::new(backend)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_stats_follow_state() {
        let (_, store) = store_with(FakeBackend::with_movies(vec![movie(1, "A"), movie(2, "B")])).await;
        store.toggle_favorite(&MovieId::from_number(2)).await.unwrap();
        let stats = store.stats();
        assert_eq!(stats.total_movies, 2);
        assert_eq!(stats.total_favorites, 1);
        assert_eq!(stats.movies_by_genre.get("Drama"), Some(&2));
    }
}
