//! Debounced search driver.
//!
//! Each [`SearchDebouncer::submit`] schedules a lookup after a fixed delay and
//! supersedes everything scheduled before it. A superseded timer wakes and
//! does nothing; a lookup that finishes after a newer query was submitted is
//! dropped, so results always belong to the most recent query.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mandi_core::Place;
use tokio::sync::watch;

use crate::client::is_searchable;
use crate::source::PlaceSearch;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// What the search panel should currently show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSnapshot {
    pub query: String,
    pub results: Vec<Place>,
    /// A lookup for `query` is in flight.
    pub loading: bool,
}

impl SearchSnapshot {
    /// The panel should show its "no results found" state.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        !self.query.is_empty() && !self.loading && self.results.is_empty()
    }
}

pub struct SearchDebouncer<S: ?Sized> {
    source: Arc<S>,
    delay: Duration,
    generation: Arc<AtomicU64>,
    tx: Arc<watch::Sender<SearchSnapshot>>,
}

impl<S> SearchDebouncer<S>
where
    S: PlaceSearch + ?Sized + 'static,
{
    #[must_use]
    pub fn new(source: Arc<S>, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(SearchSnapshot::default());
        Self {
            source,
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            tx: Arc::new(tx),
        }
    }

    /// Receiver that observes every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> SearchSnapshot {
        self.tx.borrow().clone()
    }

    /// Schedule a lookup for `query`, superseding any earlier submission.
    ///
    /// Must be called from within a Tokio runtime. Returns the submission's
    /// sequence number.
    pub fn submit(&self, query: impl Into<String>) -> u64 {
        let query = query.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.tx.send_modify(|snapshot| {
            snapshot.query.clone_from(&query);
            snapshot.loading = false;
        });

        let source = Arc::clone(&self.source);
        let latest = Arc::clone(&self.generation);
        let tx = Arc::clone(&self.tx);
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) != generation {
                return;
            }

            if !is_searchable(&query) {
                tx.send_replace(SearchSnapshot {
                    query,
                    results: Vec::new(),
                    loading: false,
                });
                return;
            }

            tx.send_modify(|snapshot| snapshot.loading = true);
            let results = source.search(&query).await;

            if latest.load(Ordering::SeqCst) != generation {
                tracing::debug!(query = %query, "discarding results for superseded query");
                return;
            }
            tracing::debug!(query = %query, count = results.len(), "search results published");
            tx.send_replace(SearchSnapshot {
                query,
                results,
                loading: false,
            });
        });

        generation
    }

    /// Drop the current query and results, cancelling anything pending.
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.tx.send_replace(SearchSnapshot::default());
    }
}
