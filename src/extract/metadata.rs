// src/extract/metadata.rs
// =============================================================================
// This module pulls structured metadata out of an HTML page.
//
// Most fields can live in several places depending on how the site was
// built. The author might be in <meta name="author">, in a .byline span, or
// in a rel="author" link. We describe each field as an ordered list of
// lookups and take the first one that produces a non-empty value.
//
// Nothing in here can fail: if a field is missing we return an empty string.
// =============================================================================

use super::links::extract_links;
use super::lookup::{first_match, meta, text, visible_text, Lookup};
use crate::record::PageAttributes;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use url::Url;

const CONTENT: &[Lookup] = &[
    text("article"),
    text(".content"),
    text(".post-content"),
    text(".entry-content"),
    text("main"),
    text(".main-content"),
    text("#content"),
    text(".article-body"),
];

const DESCRIPTION: &[Lookup] = &[
    meta(r#"meta[name="description"]"#),
    meta(r#"meta[property="og:description"]"#),
];

const KEYWORDS: &[Lookup] = &[meta(r#"meta[name="keywords"]"#)];

const AUTHOR: &[Lookup] = &[
    meta(r#"meta[name="author"]"#),
    text(".author"),
    text(".byline"),
    text(".post-author"),
    text(r#"[rel="author"]"#),
    text(".entry-author"),
];

const PUBLISH_DATE: &[Lookup] = &[
    meta(r#"meta[property="article:published_time"]"#),
    meta(r#"meta[name="publishdate"]"#),
    text(".publish-date"),
    text(".post-date"),
    text(".entry-date"),
    Lookup::attr("time[datetime]", "datetime"),
    text("time"),
];

const HEADING_LEVELS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Everything extracted from one page
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub title: String,
    pub body: String,
    pub attributes: PageAttributes,
}

// Extracts title, body text and attributes from raw HTML
//
// `base` is the page's own URL, used to make image and link URLs absolute.
pub fn extract_metadata(html: &str, base: &Url) -> Metadata {
    let document = Html::parse_document(html);

    let attributes = PageAttributes {
        description: first_match(&document, DESCRIPTION),
        keywords: first_match(&document, KEYWORDS),
        author: first_match(&document, AUTHOR),
        publish_date: first_match(&document, PUBLISH_DATE),
        images: extract_images(&document, base),
        links: extract_links(&document, base),
        headings: extract_headings(&document),
        product: None,
    };

    Metadata {
        title: extract_title(&document),
        body: extract_body(&document),
        attributes,
    }
}

fn extract_title(document: &Html) -> String {
    first_match(document, &[text("title")])
}

// Main content first, whole document as a fallback
fn extract_body(document: &Html) -> String {
    let content = first_match(document, CONTENT);
    if !content.is_empty() {
        return content;
    }
    visible_text(document.root_element())
}

fn extract_images(document: &Html, base: &Url) -> Vec<String> {
    let Ok(selector) = Selector::parse("img[src]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|img| img.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty() && !src.starts_with("data:"))
        .filter_map(|src| base.join(src).ok())
        .map(|url| url.to_string())
        .collect()
}

// Every level is present in the map, even when the page has no such heading
fn extract_headings(document: &Html) -> BTreeMap<String, Vec<String>> {
    let mut headings = BTreeMap::new();

    for level in HEADING_LEVELS {
        let texts = match Selector::parse(level) {
            Ok(selector) => document
                .select(&selector)
                .map(visible_text)
                .filter(|t| !t.is_empty())
                .collect(),
            Err(_) => Vec::new(),
        };
        headings.insert(level.to_string(), texts);
    }

    headings
}
