//! Watchlist view model.
//!
//! Holds the authoritative record set fetched for one owner plus the local
//! [`ViewParameters`], and derives the displayed projection from the two on
//! every read. Parameter changes never reach the store.
//!
//! Every fetch takes a sequence number from a shared counter. A response is
//! applied only if no fetch was issued after it, so a slow response can never
//! overwrite a newer one.

pub mod projection;

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use serde::Serialize;
use tokio::sync::RwLock;

use crate::{
    models::{MovieRecord, ViewParameters, ViewParametersPatch},
    services::store::DocumentStore,
};

pub use projection::{genre_options, project};

#[derive(Debug, Default)]
struct WatchlistState {
    records: Vec<MovieRecord>,
    params: ViewParameters,
    loading: bool,
    /// Sequence number of the load that raised `loading`
    loading_seq: Option<u64>,
    error: Option<String>,
    last_owner: Option<String>,
}

/// Everything a watchlist screen renders, read under one lock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchlistSnapshot {
    pub movies: Vec<MovieRecord>,
    pub genre_options: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub params: ViewParameters,
    /// Size of the authoritative set, before filtering
    pub total: usize,
}

#[derive(Clone)]
pub struct WatchlistViewModel {
    store: Arc<dyn DocumentStore>,
    state: Arc<RwLock<WatchlistState>>,
    issued: Arc<AtomicU64>,
}

impl WatchlistViewModel {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            state: Arc::new(RwLock::new(WatchlistState::default())),
            issued: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Foreground fetch: raises the loading flag and surfaces failures.
    ///
    /// No-op without an owner. On failure the previous record set is kept.
    pub async fn load(&self, owner_id: Option<&str>) {
        let Some(owner_id) = owner_id else {
            return;
        };

        let seq = self.next_seq();
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.loading_seq = Some(seq);
            state.error = None;
            state.last_owner = Some(owner_id.to_string());
        }

        let result = self.store.list(owner_id).await;

        let mut state = self.state.write().await;
        let current = self.is_latest(seq);
        match result {
            Ok(records) if current => {
                tracing::info!(owner_id = %owner_id, count = records.len(), "Watchlist loaded");
                state.records = records;
            }
            Err(e) if current => {
                tracing::warn!(owner_id = %owner_id, error = %e, "Watchlist load failed");
                state.error = Some(e.user_message());
            }
            _ => {
                tracing::debug!(owner_id = %owner_id, seq, "Discarding stale watchlist load");
            }
        }

        // A newer load owns the flag once it has been raised again.
        if state.loading_seq == Some(seq) {
            state.loading = false;
            state.loading_seq = None;
        }
    }

    /// Background fetch used when the screen regains focus. Never touches the
    /// loading flag or the error, and keeps the previous set on failure.
    pub async fn silent_refresh(&self, owner_id: Option<&str>) {
        let Some(owner_id) = owner_id else {
            return;
        };

        let seq = self.next_seq();
        let result = self.store.list(owner_id).await;

        let mut state = self.state.write().await;
        if !self.is_latest(seq) {
            tracing::debug!(owner_id = %owner_id, seq, "Discarding stale silent refresh");
            return;
        }

        match result {
            Ok(records) => {
                tracing::debug!(owner_id = %owner_id, count = records.len(), "Watchlist refreshed");
                state.records = records;
            }
            Err(e) => {
                tracing::debug!(owner_id = %owner_id, error = %e, "Silent refresh failed");
            }
        }
    }

    /// Retries the most recent [`WatchlistViewModel::load`].
    pub async fn refresh(&self) {
        let owner = self.state.read().await.last_owner.clone();
        self.load(owner.as_deref()).await;
    }

    /// Merges `patch` into the current parameters and returns the new
    /// projection.
    pub async fn set_view_parameters(&self, patch: ViewParametersPatch) -> Vec<MovieRecord> {
        let mut state = self.state.write().await;
        state.params.merge(patch);
        project(&state.records, &state.params)
    }

    pub async fn projection(&self) -> Vec<MovieRecord> {
        let state = self.state.read().await;
        project(&state.records, &state.params)
    }

    pub async fn genre_options(&self) -> Vec<String> {
        genre_options(&self.state.read().await.records)
    }

    pub async fn view_parameters(&self) -> ViewParameters {
        self.state.read().await.params.clone()
    }

    pub async fn snapshot(&self) -> WatchlistSnapshot {
        let state = self.state.read().await;
        WatchlistSnapshot {
            movies: project(&state.records, &state.params),
            genre_options: genre_options(&state.records),
            loading: state.loading,
            error: state.error.clone(),
            params: state.params.clone(),
            total: state.records.len(),
        }
    }

    fn next_seq(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.issued.load(Ordering::SeqCst) == seq
    }
}
