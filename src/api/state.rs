use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    config::Config,
    error::AppResult,
    services::{CatalogSource, CategorySet, ListAggregator, RandomSource, ThreadRandom, TmdbClient},
    views::ImageResolver,
};

/// A signed-in browser
#[derive(Debug, Clone)]
pub struct Session {
    pub created_at: DateTime<Utc>,
    /// Creation order, used to pick the oldest session for eviction
    seq: u64,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now.signed_duration_since(self.created_at) >= ttl
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
    pub aggregator: ListAggregator,
    pub categories: Arc<CategorySet>,
    pub images: ImageResolver,
    session_ttl: TimeDelta,
    max_sessions: usize,
}

/// Inner state that can be modified
#[derive(Default)]
pub struct AppStateInner {
    pub sessions: HashMap<Uuid, Session>,
    next_seq: u64,
}

impl AppState {
    /// Creates application state around an explicit catalog source
    pub fn new(
        source: Arc<dyn CatalogSource>,
        random: Arc<dyn RandomSource>,
        config: &Config,
    ) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner::default())),
            aggregator: ListAggregator::new(source, random, config.featured_category.clone()),
            categories: Arc::new(CategorySet::home()),
            images: ImageResolver::new(&config.tmdb_image_base_url),
            session_ttl: TimeDelta::from_std(config.session_ttl()).unwrap_or(TimeDelta::MAX),
            max_sessions: config.max_sessions.max(1),
        }
    }

    /// Production wiring: TMDB client and thread RNG
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = TmdbClient::new(config)?;
        Ok(Self::new(Arc::new(client), Arc::new(ThreadRandom), config))
    }

    /// Starts a session. Expired sessions are pruned first, and the oldest
    /// live ones are evicted while the table is at capacity.
    pub async fn create_session(&self) -> Uuid {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let mut inner = self.inner.write().await;

        let before = inner.sessions.len();
        inner
            .sessions
            .retain(|_, session| !session.is_expired(now, self.session_ttl));
        let expired = before - inner.sessions.len();

        let mut evicted = 0;
        while inner.sessions.len() >= self.max_sessions {
            let oldest = inner
                .sessions
                .iter()
                .min_by_key(|(_, session)| session.seq)
                .map(|(id, _)| *id);
            match oldest {
                Some(oldest) => {
                    inner.sessions.remove(&oldest);
                    evicted += 1;
                }
                None => break,
            }
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.sessions.insert(id, Session { created_at: now, seq });

        tracing::info!(
            session_count = inner.sessions.len(),
            expired,
            evicted,
            "Session created"
        );
        id
    }

    /// Whether `id` names a live session. An expired entry is removed.
    pub async fn has_session(&self, id: &Uuid) -> bool {
        let now = Utc::now();
        let expired = match self.inner.read().await.sessions.get(id) {
            Some(session) => session.is_expired(now, self.session_ttl),
            None => return false,
        };

        if expired {
            self.inner.write().await.sessions.remove(id);
            tracing::debug!("Session expired");
        }
        !expired
    }

    pub async fn end_session(&self, id: &Uuid) -> Option<Session> {
        self.inner.write().await.sessions.remove(id)
    }

    pub async fn session_count(&self) -> usize {
        self.inner.read().await.sessions.len()
    }
}
