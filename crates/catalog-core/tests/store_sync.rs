use catalog_backends::{CatalogBackend, HttpBackend, KeyValueStore, LocalBackend};
use catalog_core::{CatalogStore, ListQuery, MovieForm};
use catalog_mock_api::{seed_movies, spawn, MockApiState, MockDb};
use catalog_models::{FavoriteSet, MovieId, SortKey};
use std::path::Path;
use std::sync::Arc;

async fn http_store(favorites: FavoriteSet) -> (MockApiState, String, CatalogStore) {
    let state = MockApiState::new(MockDb::in_memory(seed_movies(), favorites));
    let (addr, _handle) = spawn(state.clone()).await.unwrap();
    let base_url = format!("http://{}", addr);
    let backend = HttpBackend::with_base_url(&base_url).unwrap();
    let store = CatalogStore::open(Arc::new(backend)).await.unwrap();
    (state, base_url, store)
}

async fn local_store(dir: &Path) -> CatalogStore {
    let backend: Arc<dyn CatalogBackend> =
        Arc::new(LocalBackend::new(KeyValueStore::new(dir), "movies", "favorites"));
    CatalogStore::open(backend).await.unwrap()
}

fn arrival() -> MovieForm {
    MovieForm {
        title: "Arrival".to_string(),
        year: "2016".to_string(),
        genres: vec!["Sci-Fi".to_string()],
        rating: "7.9".to_string(),
        poster: "https://example.com/arrival.jpg".to_string(),
        synopsis: "Linguist meets heptapods.".to_string(),
        cast: "Amy Adams, Jeremy Renner".to_string(),
        kind: "movie".to_string(),
        duration: "116".to_string(),
    }
}

#[tokio::test]
async fn test_store_over_mock_api() {
    let (state, _, store) = http_store(FavoriteSet::from_iter([MovieId::from_number(2)])).await;
    assert_eq!(store.backend_name(), "http");
    assert_eq!(store.movies().len(), seed_movies().len());
    assert!(store.is_favorite(&MovieId::from_number(2)));

    let draft = arrival().validate(2024).unwrap();
    let added = store.add_movie(draft).await.unwrap();
    assert_eq!(added.id, MovieId::from_number(6));
    assert_eq!(state.movies().await.len(), seed_movies().len() + 1);

    assert!(store.toggle_favorite(&added.id).await.unwrap());
    assert!(state.favorites().await.contains(&added.id));

    let sci_fi = ListQuery::new().genre("Sci-Fi").sort(SortKey::YearDesc).apply(&store.movies());
    let position = |title: &str| sci_fi.iter().position(|m| m.title == title);
    assert!(position("Arrival") < position("Inception"));
    assert!(position("Arrival").is_some());

    store.delete_movie(&added.id).await.unwrap();
    assert!(store.find_movie(&added.id).is_none());
    assert!(!store.is_favorite(&added.id));
    assert!(!state.favorites().await.contains(&added.id));

    let stats = store.stats();
    assert_eq!(stats.total_movies, seed_movies().len());
    assert_eq!(stats.total_favorites, 1);
}

#[tokio::test]
async fn test_store_picks_up_external_changes_on_reload() {
    let (_, base_url, store) = http_store(FavoriteSet::new()).await;
    let changes = store.subscribe_movies();

    // Another client adds a movie behind the store's back
    let other = HttpBackend::with_base_url(&base_url).unwrap();
    let mut draft = seed_movies()[0].to_draft();
    draft.title = "Tenet".to_string();
    other.create_movie(&draft).await.unwrap();
    assert!(!changes.has_changed().unwrap());

    store.load().await.unwrap();
    assert!(changes.has_changed().unwrap());
    assert!(store.movies().iter().any(|m| m.title == "Tenet"));
}

#[tokio::test]
async fn test_store_over_local_storage_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = local_store(dir.path()).await;
    assert!(store.movies().is_empty());
    let added = store.add_movie(arrival().validate(2024).unwrap()).await.unwrap();
    store.toggle_favorite(&added.id).await.unwrap();
    drop(store);

    let store = local_store(dir.path()).await;
    assert_eq!(store.movies().len(), 1);
    assert_eq!(store.favorite_movies().first().map(|m| m.id.clone()), Some(added.id));
}
