//! Category fan-out/fan-in and featured selection
//!
//! All category requests are started at once and joined; results are
//! reassembled by declaration index, never by arrival order. The first failed
//! category fails the whole join and the remaining requests are abandoned.

use std::{collections::HashSet, sync::Arc};

use chrono::Utc;
use tokio::task::JoinSet;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogList, FeaturedSelection, HomeCatalog, ItemDetail, MediaType},
    services::{
        catalog::{CatalogSource, Endpoint, MovieList, TimeWindow, TrendingScope},
        random::RandomSource,
    },
};

/// TMDB network id used for the originals row
const ORIGINALS_NETWORK_ID: u32 = 213;
const ACTION_GENRE_ID: u32 = 28;
const COMEDY_GENRE_ID: u32 = 35;

/// One named category to request
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRequest {
    pub slug: String,
    pub label: String,
    pub endpoint: Endpoint,
}

impl CategoryRequest {
    pub fn new(slug: impl Into<String>, label: impl Into<String>, endpoint: Endpoint) -> Self {
        Self {
            slug: slug.into(),
            label: label.into(),
            endpoint,
        }
    }
}

/// Ordered categories with unique slugs and labels
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySet {
    categories: Vec<CategoryRequest>,
}

impl CategorySet {
    pub fn new(categories: Vec<CategoryRequest>) -> AppResult<Self> {
        let mut slugs = HashSet::new();
        let mut labels = HashSet::new();

        for category in &categories {
            if !slugs.insert(category.slug.as_str()) {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate category slug '{}'",
                    category.slug
                )));
            }
            if !labels.insert(category.label.as_str()) {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate category label '{}'",
                    category.label
                )));
            }
        }

        Ok(Self { categories })
    }

    /// The rows of the browse page, top to bottom
    pub fn home() -> Self {
        Self {
            categories: vec![
                CategoryRequest::new(
                    "originals",
                    "Originals",
                    Endpoint::Discover {
                        media_type: MediaType::Tv,
                        genre: None,
                        network: Some(ORIGINALS_NETWORK_ID),
                    },
                ),
                CategoryRequest::new(
                    "trending",
                    "Trending Now",
                    Endpoint::Trending {
                        scope: TrendingScope::All,
                        window: TimeWindow::Week,
                    },
                ),
                CategoryRequest::new("topRated", "Top Rated", Endpoint::Movies(MovieList::TopRated)),
                CategoryRequest::new(
                    "action",
                    "Action Thrillers",
                    Endpoint::Discover {
                        media_type: MediaType::Movie,
                        genre: Some(ACTION_GENRE_ID),
                        network: None,
                    },
                ),
                CategoryRequest::new(
                    "comedy",
                    "Comedies",
                    Endpoint::Discover {
                        media_type: MediaType::Movie,
                        genre: Some(COMEDY_GENRE_ID),
                        network: None,
                    },
                ),
            ],
        }
    }

    pub fn get(&self, slug: &str) -> Option<&CategoryRequest> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryRequest> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Data for the watch page
#[derive(Debug, Clone)]
pub struct TitlePage {
    pub detail: ItemDetail,
    pub similar: CatalogList,
}

/// Fetches categories concurrently and assembles page data
#[derive(Clone)]
pub struct ListAggregator {
    source: Arc<dyn CatalogSource>,
    random: Arc<dyn RandomSource>,
    featured_category: String,
}

impl ListAggregator {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        random: Arc<dyn RandomSource>,
        featured_category: impl Into<String>,
    ) -> Self {
        Self {
            source,
            random,
            featured_category: featured_category.into(),
        }
    }

    pub fn featured_category(&self) -> &str {
        &self.featured_category
    }

    /// Requests every category concurrently; lists come back in declaration order.
    pub async fn load_lists(&self, categories: &CategorySet) -> AppResult<Vec<CatalogList>> {
        let mut join_set = JoinSet::new();

        for (index, category) in categories.iter().cloned().enumerate() {
            let source = Arc::clone(&self.source);
            join_set.spawn(async move {
                let fetched = source.fetch_list(&category.endpoint).await;
                match fetched {
                    Ok(items) => Ok((index, CatalogList::new(category.slug, category.label, items))),
                    Err(e) => Err((category.slug, e)),
                }
            });
        }

        let mut slots: Vec<Option<CatalogList>> = (0..categories.len()).map(|_| None).collect();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(Ok((index, list))) => slots[index] = Some(list),
                Ok(Err((slug, e))) => {
                    tracing::error!(
                        category = %slug,
                        error = %e,
                        pending = join_set.len(),
                        "Category fetch failed; abandoning remaining requests"
                    );
                    join_set.abort_all();
                    return Err(e);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Category task join error");
                    join_set.abort_all();
                    return Err(AppError::Internal(e.to_string()));
                }
            }
        }

        slots
            .into_iter()
            .map(|slot| {
                slot.ok_or_else(|| AppError::Internal("Category result missing".to_string()))
            })
            .collect()
    }

    /// Lists plus a featured title drawn from the featured category.
    ///
    /// A failed featured detail lookup only drops the banner.
    pub async fn load_home(&self, categories: &CategorySet) -> AppResult<HomeCatalog> {
        let lists = self.load_lists(categories).await?;
        let featured = self.select_featured(&lists, categories).await;

        tracing::info!(
            lists = lists.len(),
            featured = featured.is_some(),
            source = self.source.name(),
            "Home catalog assembled"
        );

        Ok(HomeCatalog {
            lists,
            featured,
            fetched_at: Utc::now(),
        })
    }

    async fn select_featured(
        &self,
        lists: &[CatalogList],
        categories: &CategorySet,
    ) -> Option<FeaturedSelection> {
        let list = lists.iter().find(|l| l.slug == self.featured_category)?;
        if list.is_empty() {
            tracing::debug!(category = %list.slug, "Featured category is empty");
            return None;
        }

        let chosen = &list.items[self.random.pick(list.items.len())];
        let media_type = chosen
            .media_type
            .or_else(|| {
                categories
                    .get(&list.slug)
                    .and_then(|c| c.endpoint.media_type())
            })
            .unwrap_or(MediaType::Tv);

        match self.source.fetch_detail(media_type, chosen.id).await {
            Ok(detail) => Some(FeaturedSelection {
                category: list.slug.clone(),
                detail,
            }),
            Err(e) => {
                tracing::warn!(
                    id = chosen.id,
                    media_type = %media_type,
                    error = %e,
                    "Featured detail lookup failed; rendering without banner"
                );
                None
            }
        }
    }

    /// A single category, for the category browse page
    pub async fn load_category(
        &self,
        categories: &CategorySet,
        slug: &str,
    ) -> AppResult<CatalogList> {
        let category = categories
            .get(slug)
            .ok_or_else(|| AppError::NotFound(format!("Unknown category '{}'", slug)))?;

        let items = self.source.fetch_list(&category.endpoint).await?;
        Ok(CatalogList::new(
            category.slug.clone(),
            category.label.clone(),
            items,
        ))
    }

    /// Detail and similar titles, fetched together.
    ///
    /// Only the detail is required; a failed similar lookup yields an empty row.
    pub async fn load_title(&self, media_type: MediaType, id: u64) -> AppResult<TitlePage> {
        let similar_endpoint = Endpoint::Similar { media_type, id };
        let (detail, similar) = tokio::join!(
            self.source.fetch_detail(media_type, id),
            self.source.fetch_list(&similar_endpoint)
        );

        let detail = detail?;
        let similar = similar.unwrap_or_else(|e| {
            tracing::warn!(id, media_type = %media_type, error = %e, "Similar titles unavailable");
            Vec::new()
        });

        Ok(TitlePage {
            detail,
            similar: CatalogList::new("similar", "More Like This", similar),
        })
    }

    pub async fn search(&self, query: &str) -> AppResult<CatalogList> {
        let items = self.source.search(query).await?;
        Ok(CatalogList::new(
            "search",
            format!("Results for \"{}\"", query.trim()),
            items,
        ))
    }
}
