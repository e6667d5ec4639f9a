// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a URL
// - Respects same-site restriction (same host and port as the seed)
// - Configurable depth and page limits
// - Polite crawling with delays between requests
// - Single-page and list scraping for when you don't want to follow links
//
// Rust concepts:
// - Generics: Crawler<F> works with any Fetcher implementation
// - Collections: HashSet for tracking visited URLs, VecDeque for queue
// =============================================================================

mod crawler;
mod frontier;

pub use crawler::Crawler;
