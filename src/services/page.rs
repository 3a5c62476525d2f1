//! Page-visit state machine
//!
//! `Loading` is entered once per mount and moves to exactly one of `Ready` or
//! `Failed`. Results that arrive for an older visit, or after unmount, are
//! dropped.

use crate::{
    error::{AppResult, FailureKind},
    models::{CatalogList, FeaturedSelection, HomeCatalog},
    services::aggregator::{CategorySet, ListAggregator},
};

/// The only text a failed page ever shows
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Loading,
    Ready {
        lists: Vec<CatalogList>,
        featured: Option<FeaturedSelection>,
    },
    Failed(FailureKind),
}

impl PageState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PageState::Loading)
    }
}

/// Token for one mount of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    generation: u64,
}

#[derive(Debug)]
pub struct PageController {
    state: PageState,
    generation: u64,
    mounted: bool,
}

impl Default for PageController {
    fn default() -> Self {
        Self::new()
    }
}

impl PageController {
    pub fn new() -> Self {
        Self {
            state: PageState::Loading,
            generation: 0,
            mounted: false,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn into_state(self) -> PageState {
        self.state
    }

    /// Starts a new visit in `Loading`
    pub fn mount(&mut self) -> Visit {
        self.generation += 1;
        self.mounted = true;
        self.state = PageState::Loading;
        Visit {
            generation: self.generation,
        }
    }

    /// Ends the current visit; anything still in flight for it is ignored
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
    }

    /// Applies the aggregation outcome for `visit`.
    ///
    /// Returns `false` when the result was stale or the state was already
    /// terminal, in which case nothing changes.
    pub fn settle(&mut self, visit: Visit, outcome: AppResult<HomeCatalog>) -> bool {
        if !self.mounted || visit.generation != self.generation {
            tracing::debug!(
                visit = visit.generation,
                current = self.generation,
                "Discarding result for a stale page visit"
            );
            return false;
        }

        if self.state.is_terminal() {
            tracing::debug!("Page state already settled; ignoring result");
            return false;
        }

        self.state = match outcome {
            Ok(home) => PageState::Ready {
                lists: home.lists,
                featured: home.featured,
            },
            Err(e) => {
                tracing::error!(error = %e, kind = ?e.kind(), "Page load failed");
                PageState::Failed(e.kind())
            }
        };
        true
    }

    /// Mounts, aggregates, and settles in one go
    pub async fn load(
        &mut self,
        aggregator: &ListAggregator,
        categories: &CategorySet,
    ) -> &PageState {
        let visit = self.mount();
        let outcome = aggregator.load_home(categories).await;
        self.settle(visit, outcome);
        &self.state
    }

    /// Re-enters `Loading` from `Failed`. Any other state is left alone.
    pub async fn retry(
        &mut self,
        aggregator: &ListAggregator,
        categories: &CategorySet,
    ) -> &PageState {
        if !matches!(self.state, PageState::Failed(_)) {
            return &self.state;
        }
        self.load(aggregator, categories).await
    }

    pub fn user_message(&self) -> Option<&'static str> {
        match self.state {
            PageState::Failed(_) => Some(GENERIC_FAILURE_MESSAGE),
            _ => None,
        }
    }
}
