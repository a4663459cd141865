use crate::error::BackendError;
use crate::http::api;
use crate::traits::CatalogBackend;
use async_trait::async_trait;
use catalog_config::HttpConfig;
use catalog_models::{FavoriteSet, FavoritesShape, Movie, MovieDraft, MovieId};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// REST backend speaking the json-server dialect
#[derive(Clone)]
pub struct HttpBackend {
    client: Arc<Client>,
    movies_url: String,
    favorites_url: String,
    favorites_shape: FavoritesShape,
}

impl HttpBackend {
    pub fn new(config: &HttpConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("moviedeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| BackendError::Http {
                url: config.base_url.clone(),
                source,
            })?;

        Ok(Self {
            client: Arc::new(client),
            movies_url: api::join_url(&config.base_url, &config.movies_path),
            favorites_url: api::join_url(&config.base_url, &config.favorites_path),
            favorites_shape: config.favorites_shape,
        })
    }

    /// Defaults for everything but the base URL
    pub fn with_base_url(base_url: &str) -> Result<Self, BackendError> {
        Self::new(&HttpConfig {
            base_url: base_url.to_string(),
            ..HttpConfig::default()
        })
    }

    pub fn movies_url(&self) -> &str {
        &self.movies_url
    }

    pub fn favorites_url(&self) -> &str {
        &self.favorites_url
    }

    fn movie_url(&self, id: &MovieId) -> String {
        format!("{}/{}", self.movies_url, urlencoding::encode(id.as_str()))
    }
}

#[async_trait]
impl CatalogBackend for HttpBackend {
    fn backend_name(&self) -> &str {
        "http"
    }

    async fn list_movies(&self) -> Result<Vec<Movie>, BackendError> {
        let movies: Vec<Movie> = api::get_json(&self.client, &self.movies_url).await?;
        info!("Fetched {} movies from {}", movies.len(), self.movies_url);
        Ok(movies)
    }

    async fn get_movie(&self, id: &MovieId) -> Result<Option<Movie>, BackendError> {
        api::get_json_opt(&self.client, &self.movie_url(id)).await
    }

    async fn create_movie(&self, draft: &MovieDraft) -> Result<Movie, BackendError> {
        api::post_json(&self.client, &self.movies_url, draft).await
    }

    async fn update_movie(&self, id: &MovieId, draft: &MovieDraft) -> Result<Movie, BackendError> {
        let body = draft.clone().with_id(id.clone());
        let url = self.movie_url(id);
        match api::put_json(&self.client, &url, &body).await {
            Err(BackendError::Status { status: 404, .. }) => Err(BackendError::NotFound(id.clone())),
            other => other,
        }
    }

    async fn delete_movie(&self, id: &MovieId) -> Result<(), BackendError> {
        match api::delete(&self.client, &self.movie_url(id)).await? {
            StatusCode::NOT_FOUND => Err(BackendError::NotFound(id.clone())),
            _ => Ok(()),
        }
    }

    async fn load_favorites(&self) -> Result<FavoriteSet, BackendError> {
        let document: Value = api::get_json(&self.client, &self.favorites_url).await?;
        let (favorites, _) = FavoriteSet::decode(document)
            .map_err(|e| BackendError::decode("favorites document", e))?;
        Ok(favorites)
    }

    async fn save_favorites(&self, favorites: &FavoriteSet) -> Result<FavoriteSet, BackendError> {
        let body = favorites.encode(self.favorites_shape);
        match api::put_json_opt(&self.client, &self.favorites_url, &body).await? {
            Some(echo) => FavoriteSet::decode(echo)
                .map(|(set, _)| set)
                .map_err(|e| BackendError::decode("favorites document", e)),
            // Nothing echoed back: the backend holds what we sent
            None => Ok(favorites.clone()),
        }
    }
}
