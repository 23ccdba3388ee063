//! Debounced, cancellable search dispatch.
//!
//! Keystroke-driven search used to fire one request per input event, in
//! two inconsistently debounced places. Here there is a single policy: a
//! supervisor task owns the query stream, waits for a 300 ms quiet
//! period, and keeps at most one search in flight. A newer query
//! supersedes the in-flight one and its result is dropped, so results
//! can never render out of order.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tokio::time;

use crate::error::AppResult;

/// Queries shorter than this are not dispatched to the store.
pub const MIN_QUERY_LEN: usize = 2;

/// Quiet period required before a query is dispatched.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(300);

/// The seam between the supervisor and whatever executes the search.
#[async_trait]
pub trait SearchBackend: Send + Sync + 'static {
    type Hit: Send + 'static;

    async fn search(&self, query: &str) -> AppResult<Vec<Self::Hit>>;
}

/// Outcome delivered to the consumer for each settled query.
#[derive(Debug, PartialEq)]
pub enum SearchEvent<T> {
    /// The query fell below the minimum length; any displayed results
    /// must be discarded without a round trip.
    Cleared,
    Results { query: String, hits: Vec<T> },
    Failed { query: String, message: String },
}

/// Handle for feeding query text to the supervisor task.
///
/// Dropping the handle shuts the task down.
pub struct SearchSupervisor {
    queries: watch::Sender<String>,
}

impl SearchSupervisor {
    /// Spawn the supervisor over `backend`. Events for settled queries
    /// arrive on the returned receiver.
    pub fn spawn<B: SearchBackend>(
        backend: Arc<B>,
    ) -> (Self, mpsc::UnboundedReceiver<SearchEvent<B::Hit>>) {
        let (query_tx, query_rx) = watch::channel(String::new());
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        tokio::spawn(drive(backend, query_rx, event_tx));
        (Self { queries: query_tx }, event_rx)
    }

    /// Feed the latest query text. Only the most recent value matters;
    /// intermediate values inside a burst are coalesced away.
    pub fn input(&self, query: impl Into<String>) {
        let _ = self.queries.send(query.into());
    }
}

async fn drive<B: SearchBackend>(
    backend: Arc<B>,
    mut queries: watch::Receiver<String>,
    events: mpsc::UnboundedSender<SearchEvent<B::Hit>>,
) {
    let mut dirty = queries.changed().await.is_ok();
    while dirty {
        dirty = false;

        // Quiet-period wait: every further keystroke restarts the timer.
        loop {
            tokio::select! {
                changed = queries.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                _ = time::sleep(DEBOUNCE_INTERVAL) => break,
            }
        }

        let query = queries.borrow_and_update().trim().to_string();
        if query.chars().count() < MIN_QUERY_LEN {
            if events.send(SearchEvent::Cleared).is_err() {
                return;
            }
            dirty = queries.changed().await.is_ok();
            continue;
        }

        tokio::select! {
            changed = queries.changed() => {
                if changed.is_err() {
                    return;
                }
                // Superseded: abandon the in-flight search and debounce
                // the newer query.
                dirty = true;
            }
            outcome = backend.search(&query) => {
                let event = match outcome {
                    Ok(hits) => SearchEvent::Results { query, hits },
                    Err(err) => SearchEvent::Failed { query, message: err.to_string() },
                };
                if events.send(event).is_err() {
                    return;
                }
                dirty = queries.changed().await.is_ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::sync::Mutex;

    struct RecordingBackend {
        calls: Mutex<Vec<String>>,
        delay: Duration,
        fail: bool,
    }

    impl RecordingBackend {
        fn new(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                delay,
                fail: false,
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchBackend for RecordingBackend {
        type Hit = String;

        async fn search(&self, query: &str) -> AppResult<Vec<String>> {
            self.calls.lock().unwrap().push(query.to_string());
            time::sleep(self.delay).await;
            if self.fail {
                return Err(AppError::Internal("search backend down".to_string()));
            }
            Ok(vec![format!("hit:{query}")])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_keystrokes_dispatches_once() {
        let backend = RecordingBackend::new(Duration::ZERO);
        let (sup, mut events) = SearchSupervisor::spawn(backend.clone());

        sup.input("d");
        sup.input("du");
        sup.input("dun");
        sup.input("dune");

        let event = events.recv().await.unwrap();
        assert_eq!(
            event,
            SearchEvent::Results {
                query: "dune".to_string(),
                hits: vec!["hit:dune".to_string()],
            }
        );
        assert_eq!(backend.calls(), vec!["dune".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn short_query_clears_without_dispatch() {
        let backend = RecordingBackend::new(Duration::ZERO);
        let (sup, mut events) = SearchSupervisor::spawn(backend.clone());

        sup.input("d");
        assert_eq!(events.recv().await.unwrap(), SearchEvent::Cleared);
        assert!(backend.calls().is_empty());

        // Whitespace-only input counts as too short after trimming.
        sup.input("   ");
        assert_eq!(events.recv().await.unwrap(), SearchEvent::Cleared);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_query_supersedes_in_flight_search() {
        let backend = RecordingBackend::new(Duration::from_millis(500));
        let (sup, mut events) = SearchSupervisor::spawn(backend.clone());

        sup.input("dune");
        // Let the debounce elapse and the first search start.
        time::advance(DEBOUNCE_INTERVAL + Duration::from_millis(1)).await;
        tokio::task::yield_now().await;

        sup.input("dune messiah");

        let event = events.recv().await.unwrap();
        assert_eq!(
            event,
            SearchEvent::Results {
                query: "dune messiah".to_string(),
                hits: vec!["hit:dune messiah".to_string()],
            }
        );
        // The first search was dispatched but its result never surfaced.
        assert_eq!(
            backend.calls(),
            vec!["dune".to_string(), "dune messiah".to_string()]
        );
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn backend_failure_is_reported_not_fatal() {
        let backend = Arc::new(RecordingBackend {
            calls: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
            fail: true,
        });
        let (sup, mut events) = SearchSupervisor::spawn(backend.clone());

        sup.input("dune");
        match events.recv().await.unwrap() {
            SearchEvent::Failed { query, .. } => assert_eq!(query, "dune"),
            other => panic!("expected Failed, got {other:?}"),
        }

        // The supervisor keeps serving queries after a failure.
        sup.input("arrakis");
        match events.recv().await.unwrap() {
            SearchEvent::Failed { query, .. } => assert_eq!(query, "arrakis"),
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
