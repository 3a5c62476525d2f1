use std::fmt::Display;

use crate::models::MediaType;

/// Which media the trending feed covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingScope {
    All,
    Movie,
    Tv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Day,
    Week,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieList {
    Popular,
    TopRated,
    Upcoming,
    NowPlaying,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvList {
    Popular,
    TopRated,
    OnTheAir,
    AiringToday,
}

/// A request against the metadata API, without credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Trending {
        scope: TrendingScope,
        window: TimeWindow,
    },
    Movies(MovieList),
    Tv(TvList),
    /// Filtered listing; `network` only applies to tv
    Discover {
        media_type: MediaType,
        genre: Option<u32>,
        network: Option<u32>,
    },
    Similar {
        media_type: MediaType,
        id: u64,
    },
    Details {
        media_type: MediaType,
        id: u64,
    },
    SearchMulti {
        query: String,
    },
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Trending { scope, window } => {
                let scope = match scope {
                    TrendingScope::All => "all",
                    TrendingScope::Movie => "movie",
                    TrendingScope::Tv => "tv",
                };
                let window = match window {
                    TimeWindow::Day => "day",
                    TimeWindow::Week => "week",
                };
                format!("/trending/{}/{}", scope, window)
            }
            Endpoint::Movies(list) => match list {
                MovieList::Popular => "/movie/popular",
                MovieList::TopRated => "/movie/top_rated",
                MovieList::Upcoming => "/movie/upcoming",
                MovieList::NowPlaying => "/movie/now_playing",
            }
            .to_string(),
            Endpoint::Tv(list) => match list {
                TvList::Popular => "/tv/popular",
                TvList::TopRated => "/tv/top_rated",
                TvList::OnTheAir => "/tv/on_the_air",
                TvList::AiringToday => "/tv/airing_today",
            }
            .to_string(),
            Endpoint::Discover { media_type, .. } => format!("/discover/{}", media_type),
            Endpoint::Similar { media_type, id } => format!("/{}/{}/similar", media_type, id),
            Endpoint::Details { media_type, id } => format!("/{}/{}", media_type, id),
            Endpoint::SearchMulti { .. } => "/search/multi".to_string(),
        }
    }

    /// Endpoint-specific query parameters (credentials and locale are added by the client)
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::Discover { genre, network, .. } => {
                let mut params = Vec::new();
                if let Some(genre) = genre {
                    params.push(("with_genres", genre.to_string()));
                }
                if let Some(network) = network {
                    params.push(("with_networks", network.to_string()));
                }
                params
            }
            Endpoint::SearchMulti { query } => vec![
                ("query", query.clone()),
                ("include_adult", "false".to_string()),
            ],
            _ => Vec::new(),
        }
    }

    /// Media type implied by the endpoint, when it only returns one kind
    pub fn media_type(&self) -> Option<MediaType> {
        match self {
            Endpoint::Trending { scope, .. } => match scope {
                TrendingScope::All => None,
                TrendingScope::Movie => Some(MediaType::Movie),
                TrendingScope::Tv => Some(MediaType::Tv),
            },
            Endpoint::Movies(_) => Some(MediaType::Movie),
            Endpoint::Tv(_) => Some(MediaType::Tv),
            Endpoint::Discover { media_type, .. }
            | Endpoint::Similar { media_type, .. }
            | Endpoint::Details { media_type, .. } => Some(*media_type),
            Endpoint::SearchMulti { .. } => None,
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}
