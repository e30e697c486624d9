//! Caller-side search discipline
//!
//! The services themselves never debounce or discard results. Interactive
//! callers use this module to:
//! - coalesce keystroke bursts into one query after a quiet period
//! - discard results of requests superseded by a newer one

use crate::models::BookSummary;
use crate::services::SearchService;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error};

/// Forward only the last query of each burst.
///
/// A query is emitted once `quiet` elapses with no newer input. When the
/// input side closes, the pending query (if any) is flushed.
pub async fn debounce_queries(
    mut input: mpsc::Receiver<String>,
    quiet: Duration,
    output: mpsc::Sender<String>,
) {
    while let Some(mut latest) = input.recv().await {
        loop {
            match tokio::time::timeout(quiet, input.recv()).await {
                Ok(Some(newer)) => latest = newer,
                Ok(None) => {
                    let _ = output.send(latest).await;
                    return;
                }
                Err(_) => break,
            }
        }

        if output.send(latest).await.is_err() {
            return;
        }
    }
}

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Latest-wins request sequencing
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket; every earlier ticket becomes stale
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// What a search screen should show next
#[derive(Debug, Clone, PartialEq)]
pub enum SearchUpdate {
    /// Blank query: empty list, no upstream call
    Cleared,
    Results {
        query: String,
        books: Vec<BookSummary>,
    },
    /// Show an empty list; the error has been logged
    Failed { query: String, message: String },
}

/// Debounced, latest-wins search over a [`SearchService`]
#[derive(Clone)]
pub struct SearchSession {
    service: Arc<SearchService>,
    sequencer: Arc<RequestSequencer>,
}

impl SearchSession {
    pub fn new(service: Arc<SearchService>) -> Self {
        Self {
            service,
            sequencer: Arc::new(RequestSequencer::new()),
        }
    }

    /// Run one query. Returns `None` when a newer query was issued before
    /// this one finished.
    pub async fn run_query(&self, query: String) -> Option<SearchUpdate> {
        let ticket = self.sequencer.issue();

        let update = if query.trim().is_empty() {
            SearchUpdate::Cleared
        } else {
            match self.service.search(&query).await {
                Ok(books) => SearchUpdate::Results { query, books },
                Err(e) => {
                    error!(error = %e, "Search failed, showing empty results");
                    SearchUpdate::Failed {
                        query,
                        message: e.to_string(),
                    }
                }
            }
        };

        if self.sequencer.is_current(ticket) {
            Some(update)
        } else {
            debug!("Discarding stale search result");
            None
        }
    }

    /// Spawn the debounce → search pipeline.
    ///
    /// Send raw keystroke states into the returned sender; current updates
    /// arrive on the receiver. Dropping the sender shuts the pipeline down
    /// after the last pending query.
    pub fn spawn(
        self,
        quiet: Duration,
    ) -> (mpsc::Sender<String>, mpsc::Receiver<SearchUpdate>, JoinHandle<()>) {
        let (input_tx, input_rx) = mpsc::channel::<String>(64);
        let (query_tx, mut query_rx) = mpsc::channel::<String>(16);
        let (update_tx, update_rx) = mpsc::channel::<SearchUpdate>(16);

        tokio::spawn(debounce_queries(input_rx, quiet, query_tx));

        let handle = tokio::spawn(async move {
            // Finished searches are reaped as they complete so a long
            // session holds at most the requests still running
            let mut in_flight = JoinSet::new();

            loop {
                tokio::select! {
                    query = query_rx.recv() => {
                        let Some(query) = query else { break };
                        let session = self.clone();
                        let update_tx = update_tx.clone();
                        in_flight.spawn(async move {
                            if let Some(update) = session.run_query(query).await {
                                let _ = update_tx.send(update).await;
                            }
                        });
                    }
                    Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
                }
            }

            while in_flight.join_next().await.is_some() {}
        });

        (input_tx, update_rx, handle)
    }
}
