//! Reusable page pieces: navigation bar, hero banner, rows and cards

use crate::models::{CatalogItem, CatalogList, FeaturedSelection, ItemDetail, MediaType};

use super::{
    escape_html,
    image::{ImageResolver, ImageSize, ImageUrl},
};

/// Scroll offset (px) past which the navigation bar turns solid
pub const NAV_SCROLL_THRESHOLD: u32 = 100;

/// Navigation bar with its cosmetic scroll state.
///
/// The scroll flag only changes styling; it never feeds back into data loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavBar {
    scrolled: bool,
}

impl NavBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Updates the scroll flag; returns whether it changed
    pub fn on_scroll(&mut self, offset: u32) -> bool {
        let scrolled = offset > NAV_SCROLL_THRESHOLD;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn render(&self, active_path: &str) -> String {
        let links = [
            ("Home", "/browse"),
            ("TV Shows", "/browse/originals"),
            ("Movies", "/browse/topRated"),
            ("New &amp; Popular", "/browse/trending"),
        ];

        let items: String = links
            .iter()
            .map(|(label, href)| {
                let class = if *href == active_path {
                    "nav__link nav__link--active"
                } else {
                    "nav__link"
                };
                format!(r#"<li><a class="{class}" href="{href}">{label}</a></li>"#)
            })
            .collect();

        let state_class = if self.scrolled { " nav--solid" } else { "" };

        format!(
            r#"<nav class="nav{state_class}" data-scroll-threshold="{NAV_SCROLL_THRESHOLD}">
<a class="nav__logo" href="/browse">STREAMFLIX</a>
<ul class="nav__links">{items}</ul>
<form class="nav__search" action="/search" method="get"><input type="search" name="q" placeholder="Titles, people, genres"></form>
<form class="nav__logout" action="/logout" method="post"><button type="submit">Sign Out</button></form>
</nav>"#
        )
    }
}

fn backdrop_style(images: &ImageResolver, item: &CatalogItem) -> String {
    match images.resolve(item.backdrop_path.as_deref(), ImageSize::BACKDROP) {
        ImageUrl::Remote(url) => format!(
            r#" style="background-image: url('{}')""#,
            escape_html(&url)
        ),
        ImageUrl::Missing => String::new(),
    }
}

/// Runtime, year, seasons and genres as a single line
pub fn detail_facts(detail: &ItemDetail) -> String {
    let mut facts = Vec::new();

    if let Some(year) = detail.release_year() {
        facts.push(year.to_string());
    }
    if let Some(minutes) = detail.runtime_minutes {
        facts.push(format!("{}h {}m", minutes / 60, minutes % 60));
    }
    if let Some(seasons) = detail.number_of_seasons {
        let noun = if seasons == 1 { "Season" } else { "Seasons" };
        facts.push(format!("{} {}", seasons, noun));
    }
    if !detail.genres.is_empty() {
        facts.push(detail.genres.join(", "));
    }

    escape_html(&facts.join(" · "))
}

/// Hero banner for the featured title
pub fn featured_banner(featured: &FeaturedSelection, images: &ImageResolver) -> String {
    let item = &featured.detail.item;
    let overview = item.overview.as_deref().unwrap_or_default();

    format!(
        r#"<header class="banner"{style}>
<div class="banner__content">
<h1 class="banner__title">{title}</h1>
<p class="banner__facts">{facts}</p>
<p class="banner__overview">{overview}</p>
<div class="banner__actions"><a class="button button--play" href="{watch}">Play</a><a class="button button--info" href="{watch}">More Info</a></div>
</div>
</header>"#,
        style = backdrop_style(images, item),
        title = escape_html(&item.title),
        facts = detail_facts(&featured.detail),
        overview = escape_html(overview),
        watch = item.watch_path(MediaType::Tv),
    )
}

/// Hero for the watch page
pub fn detail_hero(detail: &ItemDetail, images: &ImageResolver) -> String {
    let item = &detail.item;
    let tagline = detail
        .tagline
        .as_deref()
        .map(|t| format!(r#"<p class="banner__tagline">{}</p>"#, escape_html(t)))
        .unwrap_or_default();
    let rating = item
        .rating
        .map(|r| format!(r#"<span class="rating">&#9733; {:.1}</span>"#, r))
        .unwrap_or_default();

    format!(
        r#"<header class="banner banner--detail"{style}>
<div class="banner__content">
<h1 class="banner__title">{title}</h1>
{tagline}
<p class="banner__facts">{rating} {facts}</p>
<p class="banner__overview">{overview}</p>
</div>
</header>"#,
        style = backdrop_style(images, item),
        title = escape_html(&item.title),
        facts = detail_facts(detail),
        overview = escape_html(item.overview.as_deref().unwrap_or_default()),
    )
}

/// Poster card linking to the title's watch page
pub fn card(item: &CatalogItem, images: &ImageResolver) -> String {
    let title = escape_html(&item.title);
    let artwork = match images.resolve(item.poster_path.as_deref(), ImageSize::POSTER) {
        ImageUrl::Remote(url) => format!(
            r#"<img class="card__image" src="{}" alt="{}" loading="lazy">"#,
            escape_html(&url),
            title
        ),
        ImageUrl::Missing => format!(r#"<div class="card__placeholder">{}</div>"#, title),
    };
    let rating = item
        .rating
        .map(|r| format!(r#"<span class="rating">&#9733; {:.1}</span>"#, r))
        .unwrap_or_default();

    format!(
        r#"<a class="card" href="{href}" data-id="{id}">{artwork}<div class="card__details"><h4>{title}</h4>{rating}<p>{overview}</p></div></a>"#,
        href = item.watch_path(MediaType::Movie),
        id = item.id,
        overview = escape_html(item.overview.as_deref().unwrap_or_default()),
    )
}

/// A horizontally scrolling row. Empty lists render nothing at all.
pub fn row(list: &CatalogList, images: &ImageResolver) -> String {
    if list.is_empty() {
        return String::new();
    }

    let cards: String = list.items.iter().map(|item| card(item, images)).collect();

    format!(
        r#"<section class="row" data-category="{slug}"><h2 class="row__title">{label}</h2><div class="row__posters">{cards}</div></section>"#,
        slug = escape_html(&list.slug),
        label = escape_html(&list.label),
    )
}
