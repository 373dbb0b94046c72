//! # shopscout
//!
//! A concurrent scraping engine that discovers storefront URLs on a
//! hosted e-commerce platform by issuing search-engine queries built
//! from a fixed dork vocabulary, extracting platform URLs from the
//! returned HTML, and deduplicating them into a running result set.
//!
//! The library provides:
//!
//! - A worker pool coordinated per run, with cooperative stop
//! - Direct and proxied fetching with per-engine request shaping
//! - Proxy list parsing and optional liveness probing
//! - Regex-based URL extraction with canonical normalization
//! - Polled status snapshots with derived throughput metrics
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use shopscout::{EngineMode, RunOptions, Scraper};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let scraper = Scraper::new();
//!     let opts = RunOptions::new(EngineMode::Direct, 20, Duration::from_secs(30 * 60));
//!     let sites = scraper.run(opts).await?;
//!
//!     for site in sites {
//!         println!("{}", site);
//!     }
//!     Ok(())
//! }
//! ```

mod context;
mod dorks;
mod engine;
mod error;
mod extract;
mod fetch;
mod fetch_http;
mod scrape;
mod select;
mod stats;
mod worker;

pub mod proxy;

pub use context::RunContext;
pub use dorks::DORKS;
pub use engine::{direct_engines, proxy_engines, EngineMode, SearchEngine};
pub use error::{Result, ScrapeError};
pub use extract::{extract_store_urls, normalize_url, PLATFORM_SUFFIX};
pub use fetch::{Fetch, FetchResponse};
pub use fetch_http::{HttpFetcher, USER_AGENTS};
pub use scrape::{RunOptions, Scraper};
pub use select::Selector;
pub use stats::StatusSnapshot;
pub use worker::{attempt, run_worker, AttemptOutcome};
