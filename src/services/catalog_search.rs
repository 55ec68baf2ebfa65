//! Debounced search-as-you-type over a [`CatalogApi`].
//!
//! Every submission takes a new token. Only a submission that is still the
//! latest once the debounce window elapses reaches the catalog, and its result
//! is only returned if no newer submission arrived while it was in flight.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;

use crate::{models::CatalogPage, services::catalog::CatalogApi};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Blank input; the screen shows its empty prompt
    Cleared,
    /// A newer submission replaced this one
    Superseded,
    Results(CatalogPage),
    Failed(String),
}

#[derive(Clone)]
pub struct CatalogSearch {
    catalog: Arc<dyn CatalogApi>,
    debounce: Duration,
    latest: Arc<AtomicU64>,
}

impl CatalogSearch {
    pub fn new(catalog: Arc<dyn CatalogApi>, debounce: Duration) -> Self {
        Self {
            catalog,
            debounce,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Submits the current contents of the search box.
    pub async fn submit(&self, text: &str) -> SearchOutcome {
        self.submit_page(text, 1).await
    }

    /// Like [`CatalogSearch::submit`] for a later results page.
    pub async fn submit_page(&self, text: &str, page: u32) -> SearchOutcome {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let query = text.trim();
        if query.is_empty() {
            return SearchOutcome::Cleared;
        }

        tokio::time::sleep(self.debounce).await;
        if !self.is_current(token) {
            return SearchOutcome::Superseded;
        }

        let result = self.catalog.search(query, page).await;
        if !self.is_current(token) {
            tracing::debug!(query = %query, "Discarding stale catalog results");
            return SearchOutcome::Superseded;
        }

        match result {
            Ok(page) => SearchOutcome::Results(page),
            Err(e) => SearchOutcome::Failed(e.user_message()),
        }
    }

    fn is_current(&self, token: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == token
    }
}
