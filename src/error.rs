//! Error types for the scraper library.

use thiserror::Error;

/// Result type alias for scrape operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors that can occur during scrape operations.
///
/// Per-attempt failures (`Http`, `UrlParse`) are swallowed by the worker
/// loop and only recorded in the run counters; run-level preconditions
/// (`NoProxies`, `AlreadyRunning`, `InvalidConfig`) are surfaced to the
/// caller as rejections.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// I/O error (proxy list loading, result export).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Proxied mode was requested without any usable proxies.
    #[error("No usable proxies available for proxied mode")]
    NoProxies,

    /// A run is already active; at most one run at a time.
    #[error("A scrape run is already active")]
    AlreadyRunning,

    /// Invalid run configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_no_proxies() {
        let err = ScrapeError::NoProxies;
        assert_eq!(
            err.to_string(),
            "No usable proxies available for proxied mode"
        );
    }

    #[test]
    fn test_error_display_already_running() {
        let err = ScrapeError::AlreadyRunning;
        assert_eq!(err.to_string(), "A scrape run is already active");
    }

    #[test]
    fn test_error_display_invalid_config() {
        let err = ScrapeError::InvalidConfig("workers must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: workers must be > 0"
        );
    }

    #[test]
    fn test_error_display_other() {
        let err = ScrapeError::Other("something went wrong".to_string());
        assert_eq!(err.to_string(), "something went wrong");
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ScrapeError = io.into();
        assert!(matches!(err, ScrapeError::Io(_)));
    }

    #[test]
    fn test_error_debug() {
        let err = ScrapeError::AlreadyRunning;
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("AlreadyRunning"));
    }
}
