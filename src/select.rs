//! Query, engine and proxy selection policy.
//!
//! Selection is uniform random choice with replacement: it needs no
//! cross-worker coordination, so workers can pick independently without
//! touching shared state. The proxied-mode catalog declares traffic
//! weights; honoring them as sampling weights is opt-in and off by
//! default, which preserves the historically observed uniform behavior.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::seq::IndexedRandom;

use crate::dorks::DORKS;
use crate::engine::{direct_engines, proxy_engines, EngineMode, SearchEngine};
use crate::proxy::{ProxyConfig, ProxyPool};

/// Chooses a dork and a backend engine for each request attempt.
#[derive(Debug)]
pub struct Selector {
    proxy_engines: Vec<SearchEngine>,
    direct_engines: Vec<SearchEngine>,
    weighted: Option<WeightedIndex<f64>>,
    honor_weights: bool,
}

impl Selector {
    /// Creates a selector over the built-in catalogs with uniform
    /// engine choice.
    pub fn new() -> Self {
        let proxy_engines = proxy_engines();
        let weighted = WeightedIndex::new(proxy_engines.iter().map(|e| e.weight)).ok();
        Self {
            proxy_engines,
            direct_engines: direct_engines(),
            weighted,
            honor_weights: false,
        }
    }

    /// Enables or disables weighted engine sampling for proxied mode.
    pub fn with_honor_weights(mut self, honor_weights: bool) -> Self {
        self.honor_weights = honor_weights;
        self
    }

    /// Returns whether proxied-mode selection is weighted.
    pub fn honors_weights(&self) -> bool {
        self.honor_weights
    }

    /// Picks a dork uniformly at random from the catalog.
    pub fn pick_dork(&self) -> &'static str {
        DORKS
            .choose(&mut rand::rng())
            .copied()
            .expect("dork catalog is not empty")
    }

    /// Picks an engine for the given mode.
    ///
    /// Direct mode is always uniform; proxied mode is uniform unless
    /// weight honoring is enabled.
    pub fn pick_engine(&self, mode: EngineMode) -> &SearchEngine {
        let mut rng = rand::rng();
        match mode {
            EngineMode::Direct => self
                .direct_engines
                .choose(&mut rng)
                .expect("direct engine catalog is not empty"),
            EngineMode::Proxied => {
                if self.honor_weights {
                    if let Some(dist) = &self.weighted {
                        return &self.proxy_engines[dist.sample(&mut rng)];
                    }
                }
                self.proxy_engines
                    .choose(&mut rng)
                    .expect("proxy engine catalog is not empty")
            }
        }
    }

    /// Picks a proxy uniformly at random from the live pool.
    pub fn pick_proxy(&self, pool: &ProxyPool) -> Option<ProxyConfig> {
        pool.pick()
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_pick_dork_from_catalog() {
        let selector = Selector::new();
        for _ in 0..100 {
            let dork = selector.pick_dork();
            assert!(DORKS.contains(&dork));
        }
    }

    #[test]
    fn test_default_does_not_honor_weights() {
        let selector = Selector::new();
        assert!(!selector.honors_weights());
    }

    #[test]
    fn test_pick_engine_direct_from_catalog() {
        let selector = Selector::new();
        let names: Vec<String> = direct_engines().into_iter().map(|e| e.name).collect();
        for _ in 0..100 {
            let engine = selector.pick_engine(EngineMode::Direct);
            assert!(names.contains(&engine.name));
        }
    }

    #[test]
    fn test_uniform_selection_covers_all_proxy_engines() {
        let selector = Selector::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..2000 {
            let engine = selector.pick_engine(EngineMode::Proxied);
            *counts.entry(engine.name.clone()).or_default() += 1;
        }
        assert_eq!(counts.len(), proxy_engines().len());
        // Uniform over 5 engines: each expected ~400 of 2000.
        for (name, count) in &counts {
            assert!(
                *count > 200 && *count < 600,
                "engine {} drawn {} times, outside uniform bounds",
                name,
                count
            );
        }
    }

    #[test]
    fn test_weighted_selection_biases_toward_heavy_engines() {
        let selector = Selector::new().with_honor_weights(true);
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..5000 {
            let engine = selector.pick_engine(EngineMode::Proxied);
            *counts.entry(engine.name.clone()).or_default() += 1;
        }
        // Yahoo is declared at 0.35, SearX-1 at 0.10; over 5000 draws the
        // heavier engine must come out clearly ahead.
        let yahoo = counts.get("Yahoo").copied().unwrap_or(0);
        let searx = counts.get("SearX-1").copied().unwrap_or(0);
        assert!(
            yahoo > searx * 2,
            "weighted sampling not biased: Yahoo={} SearX-1={}",
            yahoo,
            searx
        );
    }

    #[test]
    fn test_pick_proxy_delegates_to_pool() {
        let selector = Selector::new();
        let pool = ProxyPool::new(vec![ProxyConfig::new("127.0.0.1", 8080)]);
        let proxy = selector.pick_proxy(&pool).unwrap();
        assert_eq!(proxy.port, 8080);

        let empty = ProxyPool::default();
        assert!(selector.pick_proxy(&empty).is_none());
    }
}
