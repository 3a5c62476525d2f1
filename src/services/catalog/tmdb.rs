//! TMDB (The Movie Database) v3 client
//!
//! Every request carries `api_key` and `language` query parameters and is
//! bounded by the configured timeout. There are no retries: a failure is
//! logged once here and handed to the caller.

use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{CatalogItem, ItemDetail, MediaType, TmdbDetail, TmdbPage},
    services::catalog::{CatalogSource, Endpoint},
};

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbClient {
    /// Creates a client from validated configuration.
    ///
    /// Fails with `AppError::Configuration` when no API key is configured, so
    /// no request can ever leave without a credential.
    pub fn new(config: &Config) -> AppResult<Self> {
        let api_key = config.api_key().ok_or_else(|| {
            tracing::error!("Cannot build TMDB client: API key is missing");
            AppError::Configuration("TMDB_API_KEY is not defined".to_string())
        })?;

        let http_client = HttpClient::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: api_key.to_string(),
            api_url: config.tmdb_base_url.trim_end_matches('/').to_string(),
            language: config.tmdb_language.clone(),
        })
    }

    /// Issues a GET for `endpoint` and decodes the JSON body.
    async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> AppResult<T> {
        let result = self.send(endpoint).await;

        if let Err(e) = &result {
            tracing::error!(
                endpoint = %endpoint,
                kind = ?e.kind(),
                error = %e,
                provider = "tmdb",
                "Catalog request failed"
            );
        }

        result
    }

    async fn send<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, endpoint.path());

        let mut query = vec![
            ("api_key", self.api_key.clone()),
            ("language", self.language.clone()),
        ];
        query.extend(endpoint.query());

        let response = self.http_client.get(&url).query(&query).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Auth(
                "TMDB rejected the configured API key".to_string(),
            ));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: format!("TMDB API returned status {}: {}", status, body),
            });
        }

        let response_text = response.text().await?;

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::debug!(response = %response_text, "Raw TMDB response");
            AppError::Upstream {
                status: status.as_u16(),
                message: format!("Failed to parse TMDB response: {}", e),
            }
        })
    }

    /// Converts a list page, dropping people from multi-search results
    fn page_items(page: TmdbPage, endpoint: &Endpoint) -> Vec<CatalogItem> {
        let implied = endpoint.media_type();

        page.results
            .into_iter()
            .filter(|raw| !raw.is_person())
            .map(|raw| {
                let mut item = CatalogItem::from(raw);
                item.media_type = item.media_type.or(implied);
                item
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl CatalogSource for TmdbClient {
    async fn fetch_list(&self, endpoint: &Endpoint) -> AppResult<Vec<CatalogItem>> {
        let page: TmdbPage = self.get(endpoint).await?;
        let items = Self::page_items(page, endpoint);

        tracing::info!(
            endpoint = %endpoint,
            results = items.len(),
            provider = "tmdb",
            "List fetched"
        );

        Ok(items)
    }

    async fn fetch_detail(&self, media_type: MediaType, id: u64) -> AppResult<ItemDetail> {
        let endpoint = Endpoint::Details { media_type, id };
        let detail: TmdbDetail = self.get(&endpoint).await?;

        tracing::debug!(media_type = %media_type, id, provider = "tmdb", "Detail fetched");

        Ok(detail.into_detail(media_type))
    }

    async fn search(&self, query: &str) -> AppResult<Vec<CatalogItem>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let endpoint = Endpoint::SearchMulti {
            query: query.to_string(),
        };
        let page: TmdbPage = self.get(&endpoint).await?;
        let items = Self::page_items(page, &endpoint);

        tracing::info!(
            query = %query,
            results = items.len(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(items)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
