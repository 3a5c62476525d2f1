#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use streamflix::{
    config::Config,
    error::{AppError, AppResult, FailureKind},
    models::{CatalogItem, ItemDetail, MediaType},
    services::{CatalogSource, CategorySet, Endpoint},
};

/// Canned outcome for one list endpoint
struct ListReply {
    endpoint: Endpoint,
    delay: Duration,
    outcome: Result<Vec<CatalogItem>, FailureKind>,
}

/// In-memory catalog source with per-endpoint delays and failures
#[derive(Default)]
pub struct StubCatalog {
    lists: Vec<ListReply>,
    details: Vec<ItemDetail>,
    detail_failure: Option<FailureKind>,
    search_results: Vec<CatalogItem>,
    completed_lists: Arc<AtomicUsize>,
    detail_calls: Arc<AtomicUsize>,
}

impl StubCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(self, endpoint: Endpoint, items: Vec<CatalogItem>) -> Self {
        self.list_after(endpoint, items, Duration::ZERO)
    }

    pub fn list_after(mut self, endpoint: Endpoint, items: Vec<CatalogItem>, delay: Duration) -> Self {
        for item in &items {
            self.details.push(detail(item.clone()));
        }
        self.lists.push(ListReply {
            endpoint,
            delay,
            outcome: Ok(items),
        });
        self
    }

    pub fn failing_list(mut self, endpoint: Endpoint, kind: FailureKind, delay: Duration) -> Self {
        self.lists.push(ListReply {
            endpoint,
            delay,
            outcome: Err(kind),
        });
        self
    }

    pub fn failing_details(mut self, kind: FailureKind) -> Self {
        self.detail_failure = Some(kind);
        self
    }

    pub fn search_results(mut self, items: Vec<CatalogItem>) -> Self {
        self.search_results = items;
        self
    }

    /// Fills every home category, `per_list` items each, ids `index * 100 + n`
    pub fn home(per_list: usize, delays: &[u64]) -> Self {
        CategorySet::home()
            .iter()
            .enumerate()
            .fold(Self::new(), |stub, (index, category)| {
                let items = (1..=per_list as u64)
                    .map(|n| item(index as u64 * 100 + n, category.endpoint.media_type()))
                    .collect();
                let delay = Duration::from_millis(delays.get(index).copied().unwrap_or(0));
                stub.list_after(category.endpoint.clone(), items, delay)
            })
    }

    /// Count of list requests that ran to completion
    pub fn completed_lists(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.completed_lists)
    }

    pub fn detail_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.detail_calls)
    }
}

#[async_trait::async_trait]
impl CatalogSource for StubCatalog {
    async fn fetch_list(&self, endpoint: &Endpoint) -> AppResult<Vec<CatalogItem>> {
        let Some(reply) = self.lists.iter().find(|r| r.endpoint == *endpoint) else {
            return Ok(Vec::new());
        };

        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        self.completed_lists.fetch_add(1, Ordering::SeqCst);

        match &reply.outcome {
            Ok(items) => Ok(items.clone()),
            Err(kind) => Err(error_for(*kind)),
        }
    }

    async fn fetch_detail(&self, media_type: MediaType, id: u64) -> AppResult<ItemDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(kind) = self.detail_failure {
            return Err(error_for(kind));
        }
        self.details
            .iter()
            .find(|d| d.item.id == id)
            .cloned()
            .map(|mut d| {
                d.item.media_type = Some(media_type);
                d
            })
            .ok_or_else(|| AppError::Upstream {
                status: 404,
                message: format!("no detail for {}", id),
            })
    }

    async fn search(&self, query: &str) -> AppResult<Vec<CatalogItem>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput("empty query".to_string()));
        }
        Ok(self.search_results.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Errors carry text that must never reach a rendered page
pub fn error_for(kind: FailureKind) -> AppError {
    let secret = "stub failure detail sk-000".to_string();
    match kind {
        FailureKind::Network => AppError::Network(secret),
        FailureKind::Auth => AppError::Auth(secret),
        FailureKind::Upstream => AppError::Upstream {
            status: 500,
            message: secret,
        },
        FailureKind::Configuration => AppError::Configuration(secret),
        FailureKind::NotFound => AppError::NotFound(secret),
        FailureKind::InvalidInput => AppError::InvalidInput(secret),
        FailureKind::Internal => AppError::Internal(secret),
    }
}

pub fn item(id: u64, media_type: Option<MediaType>) -> CatalogItem {
    CatalogItem {
        id,
        media_type,
        title: format!("Title {}", id),
        overview: Some(format!("Overview of {}", id)),
        backdrop_path: Some(format!("/backdrop{}.jpg", id)),
        poster_path: Some(format!("/poster{}.jpg", id)),
        rating: Some(7.0),
    }
}

pub fn detail(item: CatalogItem) -> ItemDetail {
    ItemDetail {
        item,
        tagline: Some("A tagline".to_string()),
        runtime_minutes: Some(100),
        genres: vec!["Drama".to_string()],
        release_date: Some("2020-01-01".to_string()),
        number_of_seasons: None,
    }
}

pub fn test_config(base_url: &str, timeout_ms: u64) -> Config {
    Config {
        tmdb_api_key: Some("test-key".to_string()),
        tmdb_base_url: base_url.to_string(),
        tmdb_image_base_url: "https://image.tmdb.org/t/p".to_string(),
        tmdb_language: "en-US".to_string(),
        request_timeout_ms: timeout_ms,
        featured_category: "originals".to_string(),
        session_ttl_secs: 3_600,
        max_sessions: 100,
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}
