use std::fmt::Display;

/// Size tokens understood by the image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W185,
    W500,
    W780,
    W1280,
    Original,
}

impl ImageSize {
    pub const PROFILE: ImageSize = ImageSize::W185;
    pub const POSTER: ImageSize = ImageSize::W500;
    pub const BACKDROP: ImageSize = ImageSize::W1280;

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W185 => "w185",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::W1280 => "w1280",
            ImageSize::Original => "original",
        }
    }
}

/// Resolved image location, or the explicit "no image" sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageUrl {
    Remote(String),
    Missing,
}

pub const NO_IMAGE: ImageUrl = ImageUrl::Missing;

impl ImageUrl {
    pub fn as_remote(&self) -> Option<&str> {
        match self {
            ImageUrl::Remote(url) => Some(url),
            ImageUrl::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ImageUrl::Missing)
    }
}

impl Display for ImageUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageUrl::Remote(url) => f.write_str(url),
            ImageUrl::Missing => f.write_str(""),
        }
    }
}

/// Maps relative asset paths to CDN URLs: `<base>/<size><path>`
#[derive(Debug, Clone)]
pub struct ImageResolver {
    base_url: String,
}

impl ImageResolver {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn resolve(&self, path: Option<&str>, size: ImageSize) -> ImageUrl {
        let path = match path.map(str::trim) {
            Some(path) if !path.is_empty() => path,
            _ => return NO_IMAGE,
        };

        let separator = if path.starts_with('/') { "" } else { "/" };
        ImageUrl::Remote(format!(
            "{}/{}{}{}",
            self.base_url,
            size.as_str(),
            separator,
            path
        ))
    }
}
