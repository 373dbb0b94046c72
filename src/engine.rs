//! Search engine catalogs and per-engine request shaping.
//!
//! Engines are plain data: an endpoint, a query-parameter key, optional
//! extra headers, and a declared traffic weight. Two catalogs exist, one
//! for proxied requests (weighted) and one for direct requests.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Whether requests go straight out or through a proxy from the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    /// Requests issued directly from the running process.
    Direct,
    /// Each request routed through a caller-supplied proxy.
    Proxied,
}

impl EngineMode {
    /// Fallback delay applied after a failed attempt, so a failing
    /// backend is not hammered in a tight loop.
    pub fn failure_delay(&self) -> Duration {
        match self {
            EngineMode::Direct => Duration::from_secs(1),
            EngineMode::Proxied => Duration::from_millis(500),
        }
    }

    /// Estimated steady-state searches per minute per worker, used to
    /// derive a bounded attempt budget from a requested duration.
    pub fn searches_per_minute(&self) -> usize {
        match self {
            EngineMode::Direct => 10,
            EngineMode::Proxied => 20,
        }
    }
}

/// A search engine backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEngine {
    /// Display name of the engine.
    pub name: String,
    /// Base search endpoint.
    pub url: String,
    /// Query-parameter key carrying the search terms.
    pub param: String,
    /// Extra headers merged into every request to this engine.
    #[serde(default)]
    pub extra_headers: Vec<(String, String)>,
    /// Declared share of expected traffic. Only applied to selection
    /// probability when the selector is configured to honor weights.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl SearchEngine {
    /// Creates a new engine with a weight of 1.0 and no extra headers.
    pub fn new(name: impl Into<String>, url: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            param: param.into(),
            extra_headers: Vec::new(),
            weight: 1.0,
        }
    }

    /// Sets the declared traffic weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Adds an extra request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Returns whether this is a SearX instance.
    pub fn is_searx(&self) -> bool {
        self.name.contains("SearX") || self.url.to_lowercase().contains("searx")
    }

    /// Engine-specific extra query parameters for one attempt.
    ///
    /// DuckDuckGo and Brave get a randomized pagination offset so repeated
    /// identical dorks surface different result pages; SearX instances need
    /// their output format pinned to HTML.
    pub fn extra_params(&self) -> Vec<(String, String)> {
        let mut rng = rand::rng();
        let mut params = Vec::new();
        match self.name.as_str() {
            "DuckDuckGo" => {
                params.push(("s".to_string(), rng.random_range(0..=100).to_string()));
            }
            "Brave" => {
                params.push(("offset".to_string(), rng.random_range(0..=20).to_string()));
            }
            _ => {}
        }
        if self.is_searx() {
            params.push(("format".to_string(), "html".to_string()));
            params.push(("categories".to_string(), "general".to_string()));
        }
        params
    }

    /// Randomized post-attempt delay for this engine.
    ///
    /// Direct requests back off longer than proxied ones, and Brave is
    /// known to throttle aggressively so it gets the longest range.
    pub fn attempt_delay(&self, mode: EngineMode) -> Duration {
        let (lo, hi) = match mode {
            EngineMode::Proxied => (0.1, 0.5),
            EngineMode::Direct if self.name == "Brave" => (1.0, 3.0),
            EngineMode::Direct => (0.5, 1.5),
        };
        Duration::from_secs_f64(rand::rng().random_range(lo..hi))
    }
}

/// The weighted engine catalog used in proxied mode.
pub fn proxy_engines() -> Vec<SearchEngine> {
    vec![
        SearchEngine::new("Yahoo", "https://search.yahoo.com/search", "p").with_weight(0.35),
        SearchEngine::new("DuckDuckGo", "https://html.duckduckgo.com/html/", "q").with_weight(0.25),
        SearchEngine::new("Brave", "https://search.brave.com/search", "q").with_weight(0.20),
        SearchEngine::new("SearX-1", "https://searx.be/search", "q").with_weight(0.10),
        SearchEngine::new("SearX-2", "https://search.sapti.me/search", "q").with_weight(0.10),
    ]
}

/// The unweighted engine catalog used in direct mode.
pub fn direct_engines() -> Vec<SearchEngine> {
    vec![
        SearchEngine::new("Yahoo", "https://search.yahoo.com/search", "p"),
        SearchEngine::new("Brave", "https://search.brave.com/search", "q")
            .with_header("Accept-Encoding", "gzip, deflate"),
        SearchEngine::new("SearX-1", "https://searx.be/search", "q"),
        SearchEngine::new("SearX-2", "https://search.sapti.me/search", "q"),
        SearchEngine::new("SearX-3", "https://searx.tiekoetter.com/search", "q"),
        SearchEngine::new("SearX-6", "https://search.ononoki.org/search", "q"),
        SearchEngine::new("SearX-7", "https://searx.nixnet.services/search", "q"),
        SearchEngine::new("SearX-9", "https://search.mdosch.de/search", "q"),
        SearchEngine::new("SearX-13", "https://priv.au/search", "q"),
        SearchEngine::new("SearX-15", "https://etsi.me/search", "q"),
        SearchEngine::new("Yandex", "https://yandex.com/search/", "text"),
        SearchEngine::new("Qwant", "https://www.qwant.com/", "q"),
    ]
}
