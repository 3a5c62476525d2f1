use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key (v3 auth). Required; validated at startup.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_base_url")]
    pub tmdb_base_url: String,

    /// TMDB image CDN base URL
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Locale sent as the `language` parameter on every request
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Category slug the featured banner is drawn from
    #[serde(default = "default_featured_category")]
    pub featured_category: String,

    /// Seconds a session stays valid after sign-in
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Upper bound on live sessions; the oldest is evicted past it
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_featured_category() -> String {
    "originals".to_string()
}

fn default_session_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_max_sessions() -> usize {
    10_000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| AppError::Configuration(format!("Failed to load config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I, K, V>(vars: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into().to_lowercase(), v.into()));
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| AppError::Configuration(format!("Failed to load config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks required settings. A missing API key is a startup error.
    pub fn validate(&self) -> AppResult<()> {
        if self.api_key().is_none() {
            tracing::error!("TMDB_API_KEY is not set; refusing to start without an API credential");
            return Err(AppError::Configuration(
                "TMDB_API_KEY is not defined".to_string(),
            ));
        }

        if self.request_timeout_ms == 0 {
            return Err(AppError::Configuration(
                "REQUEST_TIMEOUT_MS must be greater than zero".to_string(),
            ));
        }

        if self.max_sessions == 0 {
            return Err(AppError::Configuration(
                "MAX_SESSIONS must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// The API key, if set to something other than whitespace
    pub fn api_key(&self) -> Option<&str> {
        self.tmdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
