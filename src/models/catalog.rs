use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt::Display, str::FromStr};

use crate::error::AppError;

/// Kind of title on the metadata API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(AppError::InvalidInput(format!(
                "Unknown media type '{}'",
                other
            ))),
        }
    }
}

/// A single title as listed in a category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: u64,
    pub media_type: Option<MediaType>,
    pub title: String,
    pub overview: Option<String>,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    pub rating: Option<f64>,
}

impl CatalogItem {
    /// Path of the watch page for this item. Falls back to `fallback` when the
    /// payload did not say what kind of title this is.
    pub fn watch_path(&self, fallback: MediaType) -> String {
        format!("/watch/{}/{}", self.media_type.unwrap_or(fallback), self.id)
    }
}

/// A labelled, ordered sequence of items for one category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogList {
    pub slug: String,
    pub label: String,
    pub items: Vec<CatalogItem>,
}

impl CatalogList {
    /// Builds a list, dropping later duplicates of an id. Order is otherwise kept.
    pub fn new(slug: impl Into<String>, label: impl Into<String>, items: Vec<CatalogItem>) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        let items = items
            .into_iter()
            .filter(|item| seen.insert(item.id))
            .collect();

        Self {
            slug: slug.into(),
            label: label.into(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Extended information from the detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemDetail {
    pub item: CatalogItem,
    pub tagline: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub genres: Vec<String>,
    pub release_date: Option<String>,
    pub number_of_seasons: Option<u32>,
}

impl ItemDetail {
    /// Four-digit year from the release date, if present
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
    }
}

/// The title promoted to the hero banner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeaturedSelection {
    /// Slug of the category the title was drawn from
    pub category: String,
    pub detail: ItemDetail,
}

/// Everything the browse page needs
#[derive(Debug, Clone, Serialize)]
pub struct HomeCatalog {
    pub lists: Vec<CatalogList>,
    pub featured: Option<FeaturedSelection>,
    pub fetched_at: DateTime<Utc>,
}
