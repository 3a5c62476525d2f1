//! Catalog data source abstraction
//!
//! The page pipeline only talks to `CatalogSource`, so the HTTP-backed
//! `TmdbClient` can be swapped for a stub in tests.

use crate::{
    error::AppResult,
    models::{CatalogItem, ItemDetail, MediaType},
};

pub mod endpoints;
pub mod tmdb;

pub use endpoints::{Endpoint, MovieList, TimeWindow, TrendingScope, TvList};
pub use tmdb::TmdbClient;

/// Trait for catalog metadata sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one page of a list endpoint, in server order
    async fn fetch_list(&self, endpoint: &Endpoint) -> AppResult<Vec<CatalogItem>>;

    /// Fetch extended detail for a single title
    async fn fetch_detail(&self, media_type: MediaType, id: u64) -> AppResult<ItemDetail>;

    /// Search movies and tv shows by free text
    async fn search(&self, query: &str) -> AppResult<Vec<CatalogItem>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}
