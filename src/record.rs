// src/record.rs
// =============================================================================
// The data we produce for every page we scrape.
//
// A PageRecord is created once, right after a successful fetch, and never
// changes afterwards. All types derive Serialize so the output module can
// write them as JSON without any glue code.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// One fetched page
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    /// The normalized URL that was fetched
    pub address: String,
    /// Contents of <title>, empty if the page has none
    pub title: String,
    /// Primary text content of the page
    pub body: String,
    /// Structured metadata pulled from the HTML
    pub attributes: PageAttributes,
    /// When the fetch completed
    pub fetched_at: DateTime<Utc>,
    /// Final HTTP status code after redirects
    pub status_code: u16,
}

/// Metadata extracted from a page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageAttributes {
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub publish_date: String,
    /// Absolute image URLs, in document order
    pub images: Vec<String>,
    /// Absolute outbound link URLs, de-duplicated, in document order
    pub links: Vec<String>,
    /// Heading text keyed by tag name ("h1" .. "h6")
    pub headings: BTreeMap<String, Vec<String>>,
    /// Only filled in when the page was scraped as a product page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductDetails>,
}

/// Shop-specific fields of a product page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductDetails {
    pub name: String,
    pub price: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    /// "Unknown" when the page doesn't say
    pub availability: String,
    /// Absolute URLs of product photos
    pub images: Vec<String>,
    /// "key: value" rows from the specifications table
    pub specifications: BTreeMap<String, String>,
}

impl PageRecord {
    // Number of characters in the body, used for the summary
    pub fn content_chars(&self) -> usize {
        self.body.chars().count()
    }
}
