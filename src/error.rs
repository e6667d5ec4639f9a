// src/error.rs
// =============================================================================
// Error types for the scraper.
//
// We have three families of errors, and each one is handled at a different
// place:
// - FetchError: one page could not be downloaded. The crawl loop logs it and
//   moves on to the next page.
// - ConfigError: the crawl cannot even start (bad seed URL, zero page limit,
//   HTTP client could not be built). This goes back to the caller.
// - OutputError: writing results to disk failed.
//
// There is no "parse error": HTML extraction always succeeds and leaves
// fields empty when it cannot find something.
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[from]: lets the ? operator convert one error type into another
// =============================================================================

use thiserror::Error;

/// Why a single page fetch failed
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("request timed out")]
    Timeout,

    /// Could not resolve hostname
    #[error("could not resolve hostname: {0}")]
    Dns(String),

    /// SSL/TLS certificate or handshake error
    #[error("TLS error: {0}")]
    Tls(String),

    /// Too many redirects (redirect loop)
    #[error("too many redirects")]
    TooManyRedirects,

    /// TCP connection failed
    #[error("connection failed: {0}")]
    Connect(String),

    /// Server answered with a non-success status code
    #[error("HTTP {0}")]
    Status(u16),

    /// Response headers arrived but the body could not be read
    #[error("failed to read body: {0}")]
    Body(String),

    /// Anything else reqwest reports
    #[error("{0}")]
    Other(String),
}

impl FetchError {
    // Whether trying the same request again could plausibly succeed
    //
    // Client errors (404, 410, 403...) will not change on a retry, except
    // 408 Request Timeout and 429 Too Many Requests.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Status(code) => !(400..500).contains(code) || *code == 408 || *code == 429,
            FetchError::TooManyRedirects => false,
            _ => true,
        }
    }
}

/// The crawl could not be started
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid start URL '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("max pages must be at least 1")]
    ZeroPageLimit,

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl ConfigError {
    pub fn invalid_address(address: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        ConfigError::InvalidAddress {
            address: address.into(),
            reason: reason.to_string(),
        }
    }
}

/// Writing results failed
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_not_transient() {
        assert!(!FetchError::Status(404).is_transient());
        assert!(!FetchError::Status(410).is_transient());
    }

    #[test]
    fn test_server_errors_and_throttling_are_transient() {
        assert!(FetchError::Status(503).is_transient());
        assert!(FetchError::Status(429).is_transient());
        assert!(FetchError::Status(408).is_transient());
        assert!(FetchError::Timeout.is_transient());
    }

    #[test]
    fn test_invalid_address_message() {
        let err = ConfigError::invalid_address("https://", "empty host");
        assert_eq!(err.to_string(), "invalid start URL 'https://': empty host");
    }
}
