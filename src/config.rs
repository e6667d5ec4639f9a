// src/config.rs
// =============================================================================
// Scraper configuration.
//
// Everything the fetcher and the crawler need to know lives in one struct
// that the caller builds and passes in explicitly. There are no globals:
// two crawls with different settings can run side by side.
//
// Defaults:
// - 1 second courtesy delay between requests
// - 3 attempts per page, waiting 2s, 4s, ... between attempts
// - 30 second timeout per request
// - up to 10 redirects followed
// =============================================================================

use crate::error::ConfigError;
use std::time::Duration;
use url::Url;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) site-harvest/0.1";

/// Settings shared by the fetcher and the crawler
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Courtesy delay after every fetch attempt
    pub delay_between_requests: Duration,
    /// Total attempts per page (1 = no retries)
    pub max_retries: u32,
    /// Wait before retry N is `backoff_base * N`
    pub backoff_base: Duration,
    /// Per-request timeout
    pub timeout: Duration,
    /// How many redirects to follow before giving up
    pub max_redirects: usize,
    /// Optional wall-clock limit for a whole crawl
    pub crawl_deadline: Option<Duration>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            delay_between_requests: Duration::from_secs(1),
            max_retries: 3,
            backoff_base: Duration::from_secs(2),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            crawl_deadline: None,
        }
    }
}

impl ScraperConfig {
    // Wait before the given retry (1-based: the wait after the first failure is retry 1)
    pub fn backoff_for(&self, retry: u32) -> Duration {
        self.backoff_base * retry
    }
}

// Turns user input into a fully qualified URL
//
// "example.com/docs" -> "https://example.com/docs"
// "http://example.com" stays as it is
//
// Fails when the result still isn't a valid http(s) URL with a host.
pub fn normalize_address(input: &str) -> Result<Url, ConfigError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::invalid_address(input, "address is empty"));
    }

    let lower = trimmed.to_ascii_lowercase();
    let qualified = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let mut url = Url::parse(&qualified).map_err(|e| ConfigError::invalid_address(input, e))?;

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::invalid_address(input, "URL has no host"));
    }

    url.set_fragment(None);
    Ok(url)
}
