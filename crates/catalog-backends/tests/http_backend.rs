use catalog_backends::{BackendError, CatalogBackend, HttpBackend};
use catalog_config::HttpConfig;
use catalog_mock_api::{seed_movies, spawn, MockApiState, MockDb};
use catalog_models::{FavoriteSet, FavoritesShape, MovieId, Runtime};

async fn start(favorites: FavoriteSet) -> (MockApiState, String) {
    let state = MockApiState::new(MockDb::in_memory(seed_movies(), favorites));
    let (addr, _handle) = spawn(state.clone()).await.unwrap();
    (state, format!("http://{}", addr))
}

#[tokio::test]
async fn test_list_and_get() {
    let (_, base_url) = start(FavoriteSet::new()).await;
    let backend = HttpBackend::with_base_url(&base_url).unwrap();

    let movies = backend.list_movies().await.unwrap();
    assert_eq!(movies.len(), seed_movies().len());

    let movie = backend
        .get_movie(&MovieId::new("3").unwrap())
        .await
        .unwrap()
        .expect("seeded movie");
    assert_eq!(movie.title, "Spirited Away");
    assert_eq!(movie.duration, Some(Runtime::Minutes(125)));

    assert!(backend
        .get_movie(&MovieId::from_number(404))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_create_update_delete() {
    let (state, base_url) = start(FavoriteSet::new()).await;
    let backend = HttpBackend::with_base_url(&base_url).unwrap();

    let mut draft = seed_movies()[0].to_draft();
    draft.title = "Interstellar".to_string();
    draft.year = 2014;

    let created = backend.create_movie(&draft).await.unwrap();
    assert_eq!(created.id, MovieId::from_number(6));
    assert_eq!(created.title, "Interstellar");

    draft.rating = 8.7;
    let updated = backend.update_movie(&created.id, &draft).await.unwrap();
    assert_eq!(updated.rating, 8.7);
    assert_eq!(state.movies().await.last().map(|m| m.rating), Some(8.7));

    backend.delete_movie(&created.id).await.unwrap();
    assert_eq!(state.movies().await.len(), seed_movies().len());

    assert!(matches!(
        backend.delete_movie(&created.id).await,
        Err(BackendError::NotFound(_))
    ));
    assert!(matches!(
        backend.update_movie(&created.id, &draft).await,
        Err(BackendError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_favorites_in_every_write_shape() {
    let initial = FavoriteSet::from_iter([MovieId::from_number(1)]);
    let (state, base_url) = start(initial.clone()).await;

    for shape in [FavoritesShape::Array, FavoritesShape::ObjectArray, FavoritesShape::Object] {
        let backend = HttpBackend::new(&HttpConfig {
            base_url: base_url.clone(),
            favorites_shape: shape,
            ..HttpConfig::default()
        })
        .unwrap();

        let loaded = backend.load_favorites().await.unwrap();
        assert_eq!(loaded, initial);

        let next = loaded.toggled(&MovieId::from_number(2));
        let echoed = backend.save_favorites(&next).await.unwrap();
        assert_eq!(echoed, next);
        assert_eq!(state.favorites().await, next);

        // Restore for the next shape
        backend.save_favorites(&initial).await.unwrap();
    }
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    // Port 9 (discard) on localhost is almost never listening
    let backend = HttpBackend::with_base_url("http://127.0.0.1:9").unwrap();
    assert!(matches!(
        backend.list_movies().await,
        Err(BackendError::Http { .. })
    ));
}
