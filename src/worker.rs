//! Fetch worker: one search attempt at a time, results merged into
//! shared state.
//!
//! Every failure kind is swallowed inside the loop; nothing a single
//! attempt does can take down the worker or its siblings. The loop is
//! bounded by an attempt budget and exits early when the stop signal is
//! observed.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, info};

use crate::context::RunContext;
use crate::engine::{EngineMode, SearchEngine};
use crate::extract::extract_store_urls;
use crate::fetch::Fetch;
use crate::proxy::{ProxyConfig, ProxyPool};
use crate::select::Selector;
use crate::Result;

/// Outcome of a single search attempt.
#[derive(Debug)]
pub struct AttemptOutcome {
    /// Normalized storefront URLs extracted from the response.
    pub urls: HashSet<String>,
    /// Whether the response status was in [200, 400).
    pub succeeded: bool,
}

/// Executes one search attempt: builds the shaped request, sends it and
/// extracts storefront URLs from a successful response.
///
/// A non-success status yields an empty, unsuccessful outcome rather
/// than an error; transport failures surface as `Err` so the caller can
/// distinguish failure kinds.
pub async fn attempt(
    fetcher: &dyn Fetch,
    engine: &SearchEngine,
    dork: &str,
    proxy: Option<&ProxyConfig>,
) -> Result<AttemptOutcome> {
    let mut params = vec![(engine.param.clone(), dork.to_string())];
    params.extend(engine.extra_params());

    let response = fetcher.fetch(engine, &params, proxy).await?;
    if response.is_success() {
        Ok(AttemptOutcome {
            urls: extract_store_urls(&response.body),
            succeeded: true,
        })
    } else {
        Ok(AttemptOutcome {
            urls: HashSet::new(),
            succeeded: false,
        })
    }
}

/// Runs the worker loop for up to `max_attempts` attempts.
///
/// Each iteration picks a fresh dork, engine and proxy, fetches,
/// merges discoveries, and then sleeps a randomized delay. The jitter
/// is mandatory even on failure paths; a failing backend must not be
/// hammered. The loop exits the moment the stop signal is observed,
/// without setting it.
pub async fn run_worker(
    ctx: Arc<RunContext>,
    selector: Arc<Selector>,
    pool: Option<Arc<ProxyPool>>,
    fetcher: Arc<dyn Fetch>,
    mode: EngineMode,
    max_attempts: usize,
) {
    for _ in 0..max_attempts {
        if ctx.is_stopped() {
            break;
        }

        let dork = selector.pick_dork();
        let engine = selector.pick_engine(mode).clone();
        let proxy = pool.as_deref().and_then(|p| selector.pick_proxy(p));

        let delay = match attempt(fetcher.as_ref(), &engine, dork, proxy.as_ref()).await {
            Ok(outcome) if outcome.succeeded => {
                let added = ctx.record_attempt(outcome.urls).await;
                if added > 0 {
                    info!(engine = %engine.name, added, "discovered new storefronts");
                }
                engine.attempt_delay(mode)
            }
            Ok(_) => {
                ctx.record_attempt(Vec::new()).await;
                debug!(engine = %engine.name, "attempt returned non-success status");
                mode.failure_delay()
            }
            Err(err) => {
                ctx.record_attempt(Vec::new()).await;
                debug!(engine = %engine.name, error = %err, "attempt failed");
                mode.failure_delay()
            }
        };

        // Sleep the jitter, but wake immediately on stop.
        tokio::select! {
            _ = sleep(delay) => {}
            _ = ctx.stopped() => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::fetch::FetchResponse;

    struct MockFetch {
        status: u16,
        body: String,
        calls: AtomicUsize,
    }

    impl MockFetch {
        fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetch for MockFetch {
        async fn fetch(
            &self,
            _engine: &SearchEngine,
            _params: &[(String, String)],
            _proxy: Option<&ProxyConfig>,
        ) -> Result<FetchResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(FetchResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    struct FailingFetch;

    #[async_trait]
    impl Fetch for FailingFetch {
        async fn fetch(
            &self,
            _engine: &SearchEngine,
            _params: &[(String, String)],
            _proxy: Option<&ProxyConfig>,
        ) -> Result<FetchResponse> {
            Err(crate::ScrapeError::Other("connection refused".to_string()))
        }
    }

    fn test_engine() -> SearchEngine {
        SearchEngine::new("Yahoo", "https://search.yahoo.com/search", "p")
    }

    #[tokio::test]
    async fn test_attempt_success_extracts_urls() {
        let fetcher = MockFetch::new(
            200,
            r#"<a href="https://foo-bar.myshopify.com/products">store</a>"#,
        );
        let outcome = attempt(&fetcher, &test_engine(), "site:myshopify.com", None)
            .await
            .unwrap();
        assert!(outcome.succeeded);
        assert!(outcome.urls.contains("https://foo-bar.myshopify.com"));
    }

    #[tokio::test]
    async fn test_attempt_non_success_status_is_empty_not_error() {
        let fetcher = MockFetch::new(429, "slow down");
        let outcome = attempt(&fetcher, &test_engine(), "site:myshopify.com", None)
            .await
            .unwrap();
        assert!(!outcome.succeeded);
        assert!(outcome.urls.is_empty());
    }

    #[tokio::test]
    async fn test_attempt_sends_query_param_and_extras() {
        struct CapturingFetch {
            params: std::sync::Mutex<Vec<(String, String)>>,
        }

        #[async_trait]
        impl Fetch for CapturingFetch {
            async fn fetch(
                &self,
                _engine: &SearchEngine,
                params: &[(String, String)],
                _proxy: Option<&ProxyConfig>,
            ) -> Result<FetchResponse> {
                *self.params.lock().unwrap() = params.to_vec();
                Ok(FetchResponse {
                    status: 200,
                    body: String::new(),
                })
            }
        }

        let fetcher = CapturingFetch {
            params: std::sync::Mutex::new(Vec::new()),
        };
        let engine = SearchEngine::new("DuckDuckGo", "https://html.duckduckgo.com/html/", "q");
        attempt(&fetcher, &engine, "site:myshopify.com shop", None)
            .await
            .unwrap();

        let params = fetcher.params.lock().unwrap();
        assert_eq!(params[0], ("q".to_string(), "site:myshopify.com shop".to_string()));
        assert!(params.iter().any(|(k, _)| k == "s"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_worker_counts_every_attempt_exactly_once() {
        let ctx = Arc::new(RunContext::new(0));
        let fetcher = Arc::new(MockFetch::new(
            200,
            r#"<a href="https://foo.myshopify.com/x">x</a>"#,
        ));

        run_worker(
            Arc::clone(&ctx),
            Arc::new(Selector::new()),
            None,
            Arc::clone(&fetcher) as Arc<dyn Fetch>,
            EngineMode::Proxied,
            5,
        )
        .await;

        let snapshot = ctx.snapshot(false).await;
        assert_eq!(snapshot.searches, 5);
        assert_eq!(fetcher.calls(), 5);
        assert_eq!(snapshot.found, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_worker_failures_count_and_never_kill_loop() {
        let ctx = Arc::new(RunContext::new(0));

        run_worker(
            Arc::clone(&ctx),
            Arc::new(Selector::new()),
            None,
            Arc::new(FailingFetch) as Arc<dyn Fetch>,
            EngineMode::Proxied,
            3,
        )
        .await;

        let snapshot = ctx.snapshot(false).await;
        assert_eq!(snapshot.searches, 3);
        assert_eq!(snapshot.found, 0);
    }

    #[tokio::test]
    async fn test_worker_exits_immediately_when_already_stopped() {
        let ctx = Arc::new(RunContext::new(0));
        ctx.request_stop();
        let fetcher = Arc::new(MockFetch::new(200, ""));

        run_worker(
            Arc::clone(&ctx),
            Arc::new(Selector::new()),
            None,
            Arc::clone(&fetcher) as Arc<dyn Fetch>,
            EngineMode::Direct,
            100,
        )
        .await;

        assert_eq!(fetcher.calls(), 0);
        let snapshot = ctx.snapshot(false).await;
        assert_eq!(snapshot.searches, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_worker_stops_mid_run_without_setting_signal_itself() {
        let ctx = Arc::new(RunContext::new(0));
        let fetcher = Arc::new(MockFetch::new(200, ""));

        let handle = {
            let ctx = Arc::clone(&ctx);
            let fetcher = Arc::clone(&fetcher) as Arc<dyn Fetch>;
            tokio::spawn(run_worker(
                ctx,
                Arc::new(Selector::new()),
                None,
                fetcher,
                EngineMode::Direct,
                10_000,
            ))
        };

        tokio::time::sleep(Duration::from_millis(200)).await;
        ctx.request_stop();

        // The worker must drain within one attempt plus one jitter sleep.
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("worker did not stop after signal")
            .unwrap();
        assert!(fetcher.calls() < 10_000);
    }
}
