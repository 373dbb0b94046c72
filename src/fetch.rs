//! Fetch abstraction for issuing search requests.

use async_trait::async_trait;

use crate::engine::SearchEngine;
use crate::proxy::ProxyConfig;
use crate::Result;

/// A raw search response: status code and body text.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl FetchResponse {
    /// Statuses in [200, 400) count as a successful attempt; redirects
    /// that were not followed still tend to carry usable result HTML.
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }
}

/// Trait for executing one search request against an engine.
///
/// The production implementation performs real HTTP; tests substitute a
/// canned responder so worker and coordinator behavior can be exercised
/// without network access.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Sends the given query parameters to the engine's endpoint,
    /// optionally through a proxy, and returns the raw response.
    async fn fetch(
        &self,
        engine: &SearchEngine,
        params: &[(String, String)],
        proxy: Option<&ProxyConfig>,
    ) -> Result<FetchResponse>;
}
