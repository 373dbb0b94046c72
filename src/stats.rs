//! Derived run metrics.

use std::time::Duration;

use serde::Serialize;

/// A point-in-time view of run progress.
///
/// Fields are monotonic per-field but not linearizable across fields;
/// the snapshot is safe to derive at any polling frequency and never
/// mutates the underlying counters.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    /// Whether a run is currently active.
    pub active: bool,
    /// Distinct storefronts discovered so far.
    pub found: usize,
    /// Completed search attempts, success or failure.
    pub searches: u64,
    /// Proxies considered working for this run.
    pub working_proxies: usize,
    /// Seconds since the run started.
    pub elapsed_seconds: f64,
    /// Discovery throughput.
    pub sites_per_minute: f64,
    /// `found / max(1, searches)`.
    pub success_rate: f64,
}

impl StatusSnapshot {
    /// Snapshot for when no run is active.
    pub fn idle() -> Self {
        Self {
            active: false,
            found: 0,
            searches: 0,
            working_proxies: 0,
            elapsed_seconds: 0.0,
            sites_per_minute: 0.0,
            success_rate: 0.0,
        }
    }
}

/// Derives throughput and success rate from raw counters and wall-clock.
pub(crate) fn derive(
    active: bool,
    found: usize,
    searches: u64,
    working_proxies: usize,
    elapsed: Duration,
) -> StatusSnapshot {
    let elapsed_seconds = elapsed.as_secs_f64();
    let sites_per_minute = found as f64 / elapsed_seconds.max(1.0) * 60.0;
    let success_rate = found as f64 / (searches.max(1)) as f64;
    StatusSnapshot {
        active,
        found,
        searches,
        working_proxies,
        elapsed_seconds,
        sites_per_minute,
        success_rate,
    }
}
