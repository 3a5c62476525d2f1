mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use streamflix::{
    error::{AppError, FailureKind},
    models::MediaType,
    services::{
        catalog::{MovieList, TimeWindow, TrendingScope},
        CatalogSource, CategorySet, Endpoint, FixedRandom, ListAggregator, PageController,
        PageState, TmdbClient,
    },
};

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Starts a stub TMDB on an ephemeral port and returns its `/3` base URL
async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/3", addr)
}

fn recording_router(seen: Seen) -> Router {
    async fn trending(
        State(seen): State<Seen>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        seen.lock().unwrap().push(params);
        Json(json!({
            "page": 1,
            "total_pages": 1,
            "results": [
                { "id": 1, "media_type": "movie", "title": "Dune", "poster_path": "/dune.jpg", "vote_average": 8.1 },
                { "id": 2, "media_type": "person", "name": "Someone" },
                { "id": 3, "media_type": "tv", "name": "Severance", "overview": "" }
            ]
        }))
    }

    async fn discover(
        State(seen): State<Seen>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        seen.lock().unwrap().push(params);
        Json(json!({ "page": 1, "total_pages": 1, "results": [ { "id": 66732, "name": "Stranger Things" } ] }))
    }

    async fn tv_detail(Path(id): Path<u64>) -> Json<Value> {
        Json(json!({
            "id": id,
            "name": "Stranger Things",
            "tagline": "Every ending has a beginning.",
            "episode_run_time": [51],
            "first_air_date": "2016-07-15",
            "number_of_seasons": 4,
            "genres": [ { "id": 18, "name": "Drama" } ]
        }))
    }

    Router::new()
        .route("/3/trending/all/week", get(trending))
        .route("/3/discover/tv", get(discover))
        .route("/3/tv/:id", get(tv_detail))
        .with_state(seen)
}

fn client(base_url: &str, timeout_ms: u64) -> TmdbClient {
    TmdbClient::new(&common::test_config(base_url, timeout_ms)).unwrap()
}

#[tokio::test]
async fn test_every_request_carries_key_and_language() {
    let seen: Seen = Arc::default();
    let base = spawn_stub(recording_router(Arc::clone(&seen))).await;
    let client = client(&base, 2_000);

    let trending = Endpoint::Trending {
        scope: TrendingScope::All,
        window: TimeWindow::Week,
    };
    let items = client.fetch_list(&trending).await.unwrap();

    let originals = Endpoint::Discover {
        media_type: MediaType::Tv,
        genre: None,
        network: Some(213),
    };
    client.fetch_list(&originals).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    for params in seen.iter() {
        assert_eq!(params.get("api_key").map(String::as_str), Some("test-key"));
        assert_eq!(params.get("language").map(String::as_str), Some("en-US"));
    }
    assert_eq!(seen[1].get("with_networks").map(String::as_str), Some("213"));

    // People are dropped; blank overviews become None
    let ids: Vec<u64> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(items[0].title, "Dune");
    assert_eq!(items[1].title, "Severance");
    assert_eq!(items[1].overview, None);
}

#[tokio::test]
async fn test_discover_items_take_the_endpoint_media_type() {
    let seen: Seen = Arc::default();
    let base = spawn_stub(recording_router(seen)).await;

    let items = client(&base, 2_000)
        .fetch_list(&Endpoint::Discover {
            media_type: MediaType::Tv,
            genre: None,
            network: Some(213),
        })
        .await
        .unwrap();

    assert_eq!(items[0].media_type, Some(MediaType::Tv));
    assert_eq!(items[0].watch_path(MediaType::Movie), "/watch/tv/66732");
}

#[tokio::test]
async fn test_detail_uses_tv_fallbacks() {
    let seen: Seen = Arc::default();
    let base = spawn_stub(recording_router(seen)).await;

    let detail = client(&base, 2_000)
        .fetch_detail(MediaType::Tv, 66732)
        .await
        .unwrap();

    assert_eq!(detail.item.id, 66732);
    assert_eq!(detail.item.title, "Stranger Things");
    assert_eq!(detail.runtime_minutes, Some(51));
    assert_eq!(detail.release_year(), Some("2016"));
    assert_eq!(detail.number_of_seasons, Some(4));
    assert_eq!(detail.genres, vec!["Drama".to_string()]);
}

#[tokio::test]
async fn test_rejected_key_is_an_auth_failure() {
    let router = Router::new().route(
        "/3/movie/top_rated",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "status_code": 7, "status_message": "Invalid API key" })),
            )
        }),
    );
    let base = spawn_stub(router).await;

    let result = client(&base, 2_000)
        .fetch_list(&Endpoint::Movies(MovieList::TopRated))
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::Auth(_)), "{:?}", err);
    assert!(!err.to_string().contains("test-key"));
}

#[tokio::test]
async fn test_server_error_is_an_upstream_failure() {
    let router = Router::new().route(
        "/3/movie/top_rated",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let base = spawn_stub(router).await;

    let result = client(&base, 2_000)
        .fetch_list(&Endpoint::Movies(MovieList::TopRated))
        .await;

    assert!(matches!(result, Err(AppError::Upstream { status: 503, .. })));
}

#[tokio::test]
async fn test_malformed_body_is_an_upstream_failure() {
    let router = Router::new().route(
        "/3/movie/top_rated",
        get(|| async { Json(json!({ "page": 1, "results": "not a list" })) }),
    );
    let base = spawn_stub(router).await;

    let result = client(&base, 2_000)
        .fetch_list(&Endpoint::Movies(MovieList::TopRated))
        .await;

    assert!(matches!(result, Err(AppError::Upstream { .. })));
}

#[tokio::test]
async fn test_slow_response_times_out_as_network_failure() {
    let router = Router::new().route(
        "/3/movie/top_rated",
        get(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Json(json!({ "page": 1, "total_pages": 1, "results": [] }))
        }),
    );
    let base = spawn_stub(router).await;

    let result = client(&base, 50)
        .fetch_list(&Endpoint::Movies(MovieList::TopRated))
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::Network(_)), "{:?}", err);
    assert!(!err.to_string().contains("test-key"));
}

#[tokio::test]
async fn test_unreachable_host_is_a_network_failure() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client(&format!("http://{}/3", addr), 2_000)
        .fetch_list(&Endpoint::Movies(MovieList::Popular))
        .await;

    assert!(matches!(result, Err(AppError::Network(_))));
}

#[tokio::test]
async fn test_missing_key_never_sends_a_request() {
    let seen: Seen = Arc::default();
    let base = spawn_stub(recording_router(Arc::clone(&seen))).await;

    let mut config = common::test_config(&base, 2_000);
    config.tmdb_api_key = None;

    let result = TmdbClient::new(&config);
    assert!(matches!(result, Err(AppError::Configuration(_))));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_sends_query_and_excludes_adult() {
    let seen: Seen = Arc::default();
    let recorder = Arc::clone(&seen);
    let router = Router::new()
        .route(
            "/3/search/multi",
            get(
                |State(seen): State<Seen>, Query(params): Query<HashMap<String, String>>| async move {
                    seen.lock().unwrap().push(params);
                    Json(json!({ "page": 1, "total_pages": 1, "results": [ { "id": 5, "media_type": "movie", "title": "Dune" } ] }))
                },
            ),
        )
        .with_state(recorder);
    let base = spawn_stub(router).await;

    let items = client(&base, 2_000).search("  dune ").await.unwrap();
    assert_eq!(items.len(), 1);

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].get("query").map(String::as_str), Some("dune"));
    assert_eq!(seen[0].get("include_adult").map(String::as_str), Some("false"));
}

#[tokio::test]
async fn test_one_slow_category_fails_the_whole_page() {
    async fn quick() -> Json<Value> {
        Json(json!({ "page": 1, "total_pages": 1, "results": [ { "id": 1, "name": "Quick", "title": "Quick" } ] }))
    }

    let router = Router::new()
        .route("/3/discover/tv", get(quick))
        .route("/3/discover/movie", get(quick))
        .route("/3/trending/all/week", get(quick))
        .route(
            "/3/movie/top_rated",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                quick().await
            }),
        );
    let base = spawn_stub(router).await;

    let aggregator = ListAggregator::new(
        Arc::new(client(&base, 50)),
        Arc::new(FixedRandom(0)),
        "originals".to_string(),
    );
    let mut controller = PageController::new();
    let state = controller.load(&aggregator, &CategorySet::home()).await;

    assert_eq!(*state, PageState::Failed(FailureKind::Network));
}
