//! Per-run shared state.
//!
//! A `RunContext` bundles the found-site set, the run counters and the
//! stop signal for exactly one start/stop cycle. Every worker holds an
//! `Arc` to the same context; a new run gets a fresh context, so state
//! can never leak across runs.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tokio::sync::{watch, Mutex};

use crate::stats::{self, StatusSnapshot};

#[derive(Debug, Default)]
struct RunState {
    found: HashSet<String>,
    searches: u64,
}

/// Shared mutable state for one scrape run.
#[derive(Debug)]
pub struct RunContext {
    state: Mutex<RunState>,
    stop_tx: watch::Sender<bool>,
    started_at: Instant,
    working_proxies: usize,
}

impl RunContext {
    /// Creates a fresh context with empty state and an unset stop signal.
    pub fn new(working_proxies: usize) -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self {
            state: Mutex::new(RunState::default()),
            stop_tx,
            started_at: Instant::now(),
            working_proxies,
        }
    }

    /// Records one completed attempt: inserts any discovered URLs into
    /// the found-site set and bumps the search counter, all inside a
    /// single critical section. Returns how many URLs were new.
    ///
    /// The membership test and insert are one atomic unit, so duplicate
    /// discoveries across workers can neither be double-counted nor lost.
    pub async fn record_attempt(&self, urls: impl IntoIterator<Item = String>) -> usize {
        let mut state = self.state.lock().await;
        state.searches += 1;
        let before = state.found.len();
        for url in urls {
            state.found.insert(url);
        }
        state.found.len() - before
    }

    /// Sets the stop signal. Idempotent; setting it again is a no-op.
    pub fn request_stop(&self) {
        self.stop_tx.send_replace(true);
    }

    /// Returns whether the stop signal has been set.
    pub fn is_stopped(&self) -> bool {
        *self.stop_tx.borrow()
    }

    /// Resolves once the stop signal is set; immediately if it already is.
    pub async fn stopped(&self) {
        let mut rx = self.stop_tx.subscribe();
        // wait_for checks the current value first, so a signal set before
        // this call cannot be missed.
        let _ = rx.wait_for(|stopped| *stopped).await;
    }

    /// Wall-clock time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Derives a status snapshot from the current counters.
    pub async fn snapshot(&self, active: bool) -> StatusSnapshot {
        let state = self.state.lock().await;
        stats::derive(
            active,
            state.found.len(),
            state.searches,
            self.working_proxies,
            self.elapsed(),
        )
    }

    /// Returns the current found-site set as an unordered list.
    pub async fn found_sites(&self) -> Vec<String> {
        self.state.lock().await.found.iter().cloned().collect()
    }
}
