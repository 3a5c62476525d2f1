// ============================================================================
// TMDB API Types
// ============================================================================

use serde::Deserialize;

use super::catalog::{CatalogItem, ItemDetail, MediaType};

/// Paged list response (`/movie/popular`, `/trending/...`, `/search/multi`, ...)
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<TmdbListItem>,
    #[serde(default)]
    pub total_pages: u32,
}

/// Entry of a list response. Movies carry `title`, tv shows carry `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbListItem {
    pub id: u64,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl TmdbListItem {
    /// Multi-search also returns people; those are not titles.
    pub fn is_person(&self) -> bool {
        self.media_type.as_deref() == Some("person")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<TmdbListItem> for CatalogItem {
    fn from(raw: TmdbListItem) -> Self {
        let media_type = raw.media_type.as_deref().and_then(|m| m.parse().ok());
        let title = non_empty(raw.title)
            .or_else(|| non_empty(raw.name))
            .or_else(|| non_empty(raw.original_title))
            .or_else(|| non_empty(raw.original_name))
            .unwrap_or_default();

        CatalogItem {
            id: raw.id,
            media_type,
            title,
            overview: non_empty(raw.overview),
            backdrop_path: non_empty(raw.backdrop_path),
            poster_path: non_empty(raw.poster_path),
            rating: raw.vote_average,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    #[allow(dead_code)]
    pub id: u64,
    pub name: String,
}

/// Detail response from `/{movie|tv}/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbDetail {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
}

impl TmdbDetail {
    /// Converts into our model; the media type comes from the request path.
    pub fn into_detail(self, media_type: MediaType) -> ItemDetail {
        let title = non_empty(self.title)
            .or_else(|| non_empty(self.name))
            .unwrap_or_default();

        let runtime_minutes = self
            .runtime
            .filter(|minutes| *minutes > 0)
            .or_else(|| self.episode_run_time.first().copied());

        ItemDetail {
            item: CatalogItem {
                id: self.id,
                media_type: Some(media_type),
                title,
                overview: non_empty(self.overview),
                backdrop_path: non_empty(self.backdrop_path),
                poster_path: non_empty(self.poster_path),
                rating: self.vote_average,
            },
            tagline: non_empty(self.tagline),
            runtime_minutes,
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            release_date: non_empty(self.release_date).or_else(|| non_empty(self.first_air_date)),
            number_of_seasons: self.number_of_seasons,
        }
    }
}
