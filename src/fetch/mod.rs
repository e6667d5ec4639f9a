// src/fetch/mod.rs
// =============================================================================
// This module downloads pages.
//
// The crawler never talks to reqwest directly. It talks to the `Fetcher`
// trait, and `HttpFetcher` is the real implementation. This lets tests swap
// in an in-memory website without any network.
//
// Contract every Fetcher must follow:
// - follow redirects and report the FINAL url and status
// - return Err for anything that is not a 2xx response
// - do its own retrying (the crawler never retries a page)
//
// Rust concepts:
// - Traits: shared behaviour that several types can implement
// - async-trait: async fn in traits, boxed behind the scenes
// =============================================================================

mod http;

use crate::error::FetchError;
use async_trait::async_trait;
use url::Url;

pub use http::HttpFetcher;

/// A successfully downloaded page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Where we ended up after following redirects
    pub final_url: Url,
    /// Final HTTP status code (always 2xx)
    pub status: u16,
    /// Response body decoded as text
    pub body: String,
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Download one page
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}
