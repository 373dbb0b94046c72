//! Scrape run orchestration.
//!
//! The coordinator owns the worker pool and the per-run context, holds
//! the active-run slot for "at most one run at a time", and enforces the
//! wall-clock duration through a timer rather than a polling loop.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::join_all;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::context::RunContext;
use crate::engine::EngineMode;
use crate::fetch::Fetch;
use crate::fetch_http::HttpFetcher;
use crate::proxy::{ProxyConfig, ProxyPool};
use crate::select::Selector;
use crate::stats::StatusSnapshot;
use crate::worker::run_worker;
use crate::{Result, ScrapeError};

/// Configuration for one scrape run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Direct or proxied fetching.
    pub mode: EngineMode,
    /// Number of concurrent fetch workers.
    pub workers: usize,
    /// Wall-clock duration before the run is stopped.
    pub duration: Duration,
    /// Proxy pool for proxied mode; ignored in direct mode.
    pub proxies: Vec<ProxyConfig>,
    /// Honor declared engine weights as sampling weights.
    pub honor_weights: bool,
}

impl RunOptions {
    /// Creates options with no proxies and uniform engine selection.
    pub fn new(mode: EngineMode, workers: usize, duration: Duration) -> Self {
        Self {
            mode,
            workers,
            duration,
            proxies: Vec::new(),
            honor_weights: false,
        }
    }

    /// Supplies the proxy pool for proxied mode.
    pub fn with_proxies(mut self, proxies: Vec<ProxyConfig>) -> Self {
        self.proxies = proxies;
        self
    }

    /// Enables weighted engine sampling.
    pub fn with_honor_weights(mut self, honor_weights: bool) -> Self {
        self.honor_weights = honor_weights;
        self
    }

    /// Per-worker attempt budget derived from the estimated steady-state
    /// throughput for the mode, so each worker loop is bounded.
    fn attempt_budget(&self) -> usize {
        let minutes = (self.duration.as_secs_f64() / 60.0).ceil().max(1.0) as usize;
        self.mode.searches_per_minute() * minutes
    }
}

/// Orchestrates scrape runs: spawns workers, enforces duration, exposes
/// stop and status to external callers.
pub struct Scraper {
    fetcher: Arc<dyn Fetch>,
    // std Mutex so the run guard can clear the slot from Drop; never
    // held across an await.
    active: Mutex<Option<Arc<RunContext>>>,
}

/// Clears the active slot and signals stop when the owning `run` future
/// is dropped, completed or not. Without this, a cancelled `run` would
/// leave the slot occupied forever and its workers running their full
/// budget.
struct RunGuard<'a> {
    scraper: &'a Scraper,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if let Some(ctx) = self.scraper.active_slot().take() {
            ctx.request_stop();
        }
    }
}

impl Scraper {
    /// Creates a scraper using the real HTTP fetcher.
    pub fn new() -> Self {
        Self::with_fetcher(Arc::new(HttpFetcher::new()))
    }

    /// Creates a scraper with a custom fetcher.
    pub fn with_fetcher(fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            fetcher,
            active: Mutex::new(None),
        }
    }

    fn active_slot(&self) -> std::sync::MutexGuard<'_, Option<Arc<RunContext>>> {
        // A poisoned lock only means a panic elsewhere; the slot state
        // itself is always valid.
        self.active.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Runs one scrape to completion and returns the final found-site
    /// set (unordered; callers sort if needed).
    ///
    /// Rejects with [`ScrapeError::AlreadyRunning`] while another run is
    /// draining, and with [`ScrapeError::NoProxies`] when proxied mode
    /// has an empty pool. A run that finds nothing returns an empty set
    /// after the full duration, not an error.
    pub async fn run(&self, opts: RunOptions) -> Result<Vec<String>> {
        if opts.workers == 0 {
            return Err(ScrapeError::InvalidConfig("workers must be > 0".into()));
        }
        if opts.duration.is_zero() {
            return Err(ScrapeError::InvalidConfig("duration must be > 0".into()));
        }

        let pool = match opts.mode {
            EngineMode::Proxied => {
                if opts.proxies.is_empty() {
                    return Err(ScrapeError::NoProxies);
                }
                Some(Arc::new(ProxyPool::new(opts.proxies.clone())))
            }
            EngineMode::Direct => None,
        };
        let working_proxies = pool.as_ref().map(|p| p.len()).unwrap_or(0);

        let ctx = Arc::new(RunContext::new(working_proxies));
        {
            let mut active = self.active_slot();
            if active.is_some() {
                return Err(ScrapeError::AlreadyRunning);
            }
            *active = Some(Arc::clone(&ctx));
        }
        let _guard = RunGuard { scraper: self };

        let selector = Arc::new(Selector::new().with_honor_weights(opts.honor_weights));
        let budget = opts.attempt_budget();
        info!(
            mode = ?opts.mode,
            workers = opts.workers,
            duration_secs = opts.duration.as_secs(),
            budget,
            working_proxies,
            "starting scrape run"
        );

        let handles: Vec<_> = (0..opts.workers)
            .map(|_| {
                tokio::spawn(run_worker(
                    Arc::clone(&ctx),
                    Arc::clone(&selector),
                    pool.clone(),
                    Arc::clone(&self.fetcher),
                    opts.mode,
                    budget,
                ))
            })
            .collect();

        // Duration watchdog: a single timer racing the stop signal, no
        // polling. External stop() wins the race by setting the signal.
        tokio::select! {
            _ = sleep(opts.duration) => {
                debug!("run duration elapsed");
            }
            _ = ctx.stopped() => {
                debug!("stop signal observed before duration elapsed");
            }
        }
        ctx.request_stop();

        // Cooperative drain: each worker finishes its in-flight attempt,
        // bounded by the request timeout plus one jitter sleep.
        for result in join_all(handles).await {
            let _ = result;
        }

        let sites = ctx.found_sites().await;
        let snapshot = ctx.snapshot(false).await;
        info!(
            found = snapshot.found,
            searches = snapshot.searches,
            elapsed_seconds = snapshot.elapsed_seconds,
            "scrape run complete"
        );

        // The guard clears the slot on the way out.
        Ok(sites)
    }

    /// Sets the stop signal on the active run, if any. Termination is
    /// cooperative; `run` returns once workers have drained.
    pub fn stop(&self) {
        if let Some(ctx) = self.active_slot().as_ref() {
            ctx.request_stop();
        }
    }

    /// Returns a status snapshot, idle when no run is active. Safe to
    /// call concurrently with running workers at any frequency.
    pub async fn status(&self) -> StatusSnapshot {
        let ctx = self.active_slot().clone();
        match ctx {
            Some(ctx) => ctx.snapshot(true).await,
            None => StatusSnapshot::idle(),
        }
    }
}

impl Default for Scraper {
    fn default() -> Self {
        Self::new()
    }
}
