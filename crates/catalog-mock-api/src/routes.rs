use crate::db::{DbError, MockDb};
use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use catalog_models::{FavoriteSet, Movie, MovieDraft, MovieId};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct MockApiState {
    db: Arc<Mutex<MockDb>>,
}

impl MockApiState {
    pub fn new(db: MockDb) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Snapshot of the stored movies
    pub async fn movies(&self) -> Vec<Movie> {
        self.db.lock().await.movies().to_vec()
    }

    /// Snapshot of the stored favorites
    pub async fn favorites(&self) -> FavoriteSet {
        self.db.lock().await.favorites().clone()
    }
}

enum ApiError {
    NotFound,
    BadRequest(String),
    Storage(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // json-server answers unknown ids with an empty object
            ApiError::NotFound => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Storage(e) => {
                error!("Mock db change rejected: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": e.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        ApiError::Storage(e)
    }
}

fn parse_id(raw: &str) -> Result<MovieId, ApiError> {
    MovieId::new(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

async fn list_movies(State(state): State<MockApiState>) -> Json<Vec<Movie>> {
    let db = state.db.lock().await;
    debug!("GET /movies ({} rows)", db.movies().len());
    Json(db.movies().to_vec())
}

async fn get_movie(
    State(state): State<MockApiState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let id = parse_id(&id)?;
    let db = state.db.lock().await;
    db.movie(&id).cloned().map(Json).ok_or(ApiError::NotFound)
}

async fn create_movie(
    State(state): State<MockApiState>,
    Json(draft): Json<MovieDraft>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let mut db = state.db.lock().await;
    let movie = db.commit(|db| Ok::<_, ApiError>(db.insert(draft)?)).await?;
    info!("Created movie {} ({})", movie.id, movie.title);
    Ok((StatusCode::CREATED, Json(movie)))
}

async fn update_movie(
    State(state): State<MockApiState>,
    Path(id): Path<String>,
    Json(draft): Json<MovieDraft>,
) -> Result<Json<Movie>, ApiError> {
    let id = parse_id(&id)?;
    let mut db = state.db.lock().await;
    let movie = db
        .commit(|db| db.replace(&id, draft).ok_or(ApiError::NotFound))
        .await?;
    info!("Updated movie {}", id);
    Ok(Json(movie))
}

async fn delete_movie(
    State(state): State<MockApiState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let mut db = state.db.lock().await;
    db.commit(|db| db.remove(&id).ok_or(ApiError::NotFound)).await?;
    info!("Deleted movie {}", id);
    Ok(Json(json!({})))
}

async fn get_favorites(State(state): State<MockApiState>) -> Json<Value> {
    let db = state.db.lock().await;
    Json(db.favorites().encode(db.favorites_shape()))
}

async fn put_favorites(
    State(state): State<MockApiState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let (favorites, _) =
        FavoriteSet::decode(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let mut db = state.db.lock().await;
    db.commit(|db| {
        db.set_favorites(favorites);
        Ok::<_, ApiError>(())
    })
    .await?;
    debug!("PUT /favorites ({} ids)", db.favorites().len());
    Ok(Json(db.favorites().encode(db.favorites_shape())))
}

pub fn router(state: MockApiState) -> Router {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route(
            "/movies/:id",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .route("/favorites", get(get_favorites).put(put_favorites))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(listener: TcpListener, state: MockApiState) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!("Mock API listening on http://{}", addr);
    axum::serve(listener, router(state))
        .await
        .context("Mock API server failed")
}

/// Start the API on an ephemeral localhost port in the background
pub async fn spawn(state: MockApiState) -> anyhow::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        if let Err(e) = serve(listener, state).await {
            error!("{:#}", e);
        }
    });
    Ok((addr, handle))
}
