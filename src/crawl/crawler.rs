// src/crawl/crawler.rs
// =============================================================================
// This module implements website crawling with a breadth-first approach.
//
// How it works:
// 1. Start with the seed URL in the queue at depth 0
// 2. Pop the front of the queue; skip it if already visited or too deep
// 3. Fetch the page and turn it into a PageRecord
// 4. If we may go deeper, queue its same-site links at depth + 1
// 5. Sleep for the courtesy delay, then repeat
// 6. Stop when the queue is empty, we have max_pages records, or the
//    optional deadline passed
//
// Politeness:
// - One request at a time, never in parallel
// - Courtesy delay after every fetch attempt, even failed ones, unless
//   that fetch was the last one the crawl will make
// - Only crawls the seed's host and port
//
// Besides crawling, the Crawler can scrape a news category (the articles
// it links to) or a single product page.
//
// Failure handling:
// - A page that fails to download is logged and skipped
// - Its links are never discovered
// - Only a bad seed URL or page limit stops the crawl before it starts
// =============================================================================

use super::frontier::Frontier;
use crate::config::{normalize_address, ScraperConfig};
use crate::error::{ConfigError, FetchError};
use crate::extract::{article_links, extract_metadata, extract_product, same_site_links};
use crate::fetch::{FetchedPage, Fetcher};
use crate::record::PageRecord;
use chrono::Utc;
use log::{debug, info, warn};
use tokio::time::Instant;
use url::Url;

/// Why the crawl loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Nothing left in the queue
    FrontierExhausted,
    /// Collected max_pages records
    PageLimit,
    /// The configured crawl deadline passed
    Deadline,
}

/// Everything a crawl produced
#[derive(Debug)]
pub struct CrawlReport {
    /// Successfully fetched pages, in fetch order
    pub pages: Vec<PageRecord>,
    /// Number of fetches issued
    pub attempted: usize,
    /// Number of fetches that failed (attempted - pages.len())
    pub failed: usize,
    pub stopped_by: StopReason,
}

pub struct Crawler<F: Fetcher> {
    fetcher: F,
    config: ScraperConfig,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(fetcher: F, config: ScraperConfig) -> Self {
        Self { fetcher, config }
    }

    // Crawls a website breadth-first
    //
    // Parameters:
    //   start_address: where to start; "example.com" becomes "https://example.com/"
    //   max_pages: stop after this many records (must be >= 1)
    //   max_depth: how many link hops to follow (0 = just the seed)
    //
    // Returns: a report whose `pages` are the fetched records in fetch order,
    // plus attempt/failure counts and why the loop stopped
    pub async fn crawl(
        &self,
        start_address: &str,
        max_pages: usize,
        max_depth: usize,
    ) -> Result<CrawlReport, ConfigError> {
        if max_pages == 0 {
            return Err(ConfigError::ZeroPageLimit);
        }
        let seed = normalize_address(start_address)?;

        info!(
            "Crawling {} (max pages: {}, max depth: {})",
            seed, max_pages, max_depth
        );

        let started = Instant::now();
        let mut frontier = Frontier::new(seed.clone());
        let mut pages = Vec::new();
        let mut attempted = 0;
        let mut failed = 0;

        let stopped_by = loop {
            if pages.len() >= max_pages {
                break StopReason::PageLimit;
            }
            if let Some(limit) = self.config.crawl_deadline {
                if started.elapsed() >= limit {
                    break StopReason::Deadline;
                }
            }
            let Some(item) = frontier.pop() else {
                break StopReason::FrontierExhausted;
            };

            if item.depth > max_depth {
                debug!("Skipping {} (depth {} > {})", item.address, item.depth, max_depth);
                continue;
            }
            // Marked before fetching so a failed page is never queued again
            if !frontier.mark_visited(&item.address) {
                debug!("Skipping {} (already visited)", item.address);
                continue;
            }

            info!("Crawling [depth {}]: {}", item.depth, item.address);
            attempted += 1;

            match self.fetch_record(&item.address).await {
                Ok(record) => {
                    if item.depth < max_depth {
                        let mut queued = 0;
                        for link in same_site_links(&record.attributes.links, &seed) {
                            if frontier.push(link, item.depth + 1) {
                                queued += 1;
                            }
                        }
                        debug!("Queued {} link(s) from {}", queued, item.address);
                    }
                    pages.push(record);
                }
                Err(e) => {
                    warn!("Failed to fetch {}: {}", item.address, e);
                    failed += 1;
                }
            }

            // A finished crawl never sleeps
            if pages.len() < max_pages && !frontier.is_empty() {
                self.courtesy_delay().await;
            }
        };

        info!(
            "Crawl finished: {} page(s) scraped, {} failed, {} visited ({:?})",
            pages.len(),
            failed,
            frontier.visited_count(),
            stopped_by
        );

        Ok(CrawlReport {
            pages,
            attempted,
            failed,
            stopped_by,
        })
    }

    // Scrapes a single page without following any links
    //
    // Returns None (after logging) if the address is invalid or the fetch fails
    pub async fn scrape_page(&self, address: &str) -> Option<PageRecord> {
        let url = match normalize_address(address) {
            Ok(url) => url,
            Err(e) => {
                warn!("Skipping {}: {}", address, e);
                return None;
            }
        };

        match self.fetch_record(&url).await {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                None
            }
        }
    }

    // Scrapes a list of pages one after another, skipping failures
    pub async fn scrape_pages(&self, addresses: &[String]) -> Vec<PageRecord> {
        let mut pages = Vec::new();

        for (i, address) in addresses.iter().enumerate() {
            info!("Scraping: {}", address);
            if let Some(record) = self.scrape_page(address).await {
                pages.push(record);
            }
            if i + 1 < addresses.len() {
                self.courtesy_delay().await;
            }
        }

        pages
    }

    // Scrapes the articles a news category page links to
    //
    // The category page itself is not part of the result, and article
    // links are followed wherever they point. Stops once max_articles
    // articles were scraped; failed articles don't count.
    pub async fn scrape_news_category(
        &self,
        category: &str,
        max_articles: usize,
    ) -> Vec<PageRecord> {
        let url = match normalize_address(category) {
            Ok(url) => url,
            Err(e) => {
                warn!("Skipping {}: {}", category, e);
                return Vec::new();
            }
        };

        info!("Scraping news category: {}", url);
        let listing = match self.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                return Vec::new();
            }
        };

        let links = article_links(&listing.body, &listing.final_url);
        info!("Found {} article link(s) on {}", links.len(), url);

        let mut articles = Vec::new();
        for link in links {
            if articles.len() >= max_articles {
                break;
            }
            self.courtesy_delay().await;

            info!("Scraping article: {}", link);
            match self.fetch_record(&link).await {
                Ok(record) => articles.push(record),
                Err(e) => warn!("Failed to fetch {}: {}", link, e),
            }
        }

        articles
    }

    // Scrapes a shop product page
    //
    // The record gets the usual page metadata plus `attributes.product`.
    // Title and body are replaced by the product name and description when
    // the page has them.
    pub async fn scrape_product(&self, address: &str) -> Option<PageRecord> {
        let url = match normalize_address(address) {
            Ok(url) => url,
            Err(e) => {
                warn!("Skipping {}: {}", address, e);
                return None;
            }
        };

        info!("Scraping product: {}", url);
        let page = match self.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                return None;
            }
        };

        let product = extract_product(&page.body, &page.final_url);
        let mut record = build_record(&url, page);
        if !product.name.is_empty() {
            record.title = product.name.clone();
        }
        if !product.description.is_empty() {
            record.body = product.description.clone();
        }
        record.attributes.product = Some(product);

        Some(record)
    }

    // Fetches a page and builds its record
    async fn fetch_record(&self, address: &Url) -> Result<PageRecord, FetchError> {
        let page = self.fetcher.fetch(address).await?;
        Ok(build_record(address, page))
    }

    async fn courtesy_delay(&self) {
        if !self.config.delay_between_requests.is_zero() {
            tokio::time::sleep(self.config.delay_between_requests).await;
        }
    }
}

// Turns a downloaded page into a PageRecord
//
// The record keeps the address we asked for (so addresses stay unique per
// crawl), but relative links are resolved against where the redirects
// actually took us.
fn build_record(address: &Url, page: FetchedPage) -> PageRecord {
    let metadata = extract_metadata(&page.body, &page.final_url);

    PageRecord {
        address: address.to_string(),
        title: metadata.title,
        body: metadata.body,
        attributes: metadata.attributes,
        fetched_at: Utc::now(),
        status_code: page.status,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is Crawler<F: Fetcher>?
//    - A generic struct: F can be any type that implements Fetcher
//    - In the binary F is HttpFetcher, in tests it's an in-memory FakeSite
//    - The compiler generates a separate version for each F (no runtime cost)
//
// 2. What is `break value` in a loop?
//    - `loop` is an expression, and `break StopReason::PageLimit` makes
//      the whole loop evaluate to that value
//    - That's how stopped_by gets assigned
//
// 3. What is let-else?
//    - let Some(item) = frontier.pop() else { ... };
//    - If the pattern doesn't match, the else block runs and must leave
//      (break, continue or return)
//
// 4. Why tokio::time::Instant instead of std::time::Instant?
//    - Tests can pause tokio's clock (start_paused = true)
//    - Sleeps then finish instantly and elapsed() reports virtual time
//    - So we can check delays without tests actually waiting
//
// 5. Why return Option from scrape_page but Result from crawl?
//    - A failed page is expected and just skipped (None)
//    - A bad start address or page limit means the crawl can't begin (Err)
// -----------------------------------------------------------------------------
