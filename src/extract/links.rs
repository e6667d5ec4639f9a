// src/extract/links.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to:
// - Resolve relative URLs to absolute URLs
// - Compare the network location (host + port) of two URLs
//
// Rust concepts:
// - Iterators: For processing collections
// - HashSet::insert returning bool: a one-step "have I seen this?" check
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

// Extracts all links from a parsed document
//
// Parameters:
//   document: the parsed HTML
//   base: the URL of the page (for resolving relative links)
//
// Returns: absolute http/https URLs without fragments, in the order they
// appear on the page, each URL at most once
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='/docs#intro'>Intro</a>"
//   base = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_links(document: &Html, base: &Url) -> Vec<String> {
    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(url) = resolve_link(base, href) {
            let address = url.to_string();
            // insert() returns false when the link was already on this page
            if seen.insert(address.clone()) {
                links.push(address);
            }
        }
    }

    links
}

// Keeps only links on the same network location as `origin`
//
// "Same site" means exact host and port match. Subdomains do NOT count:
// blog.example.com is a different site from example.com.
pub fn same_site_links(links: &[String], origin: &Url) -> Vec<Url> {
    links
        .iter()
        .filter_map(|link| Url::parse(link).ok())
        .filter(|url| same_network_location(url, origin))
        .collect()
}

// Compares host and explicit port of two URLs
//
// The url crate drops default ports while parsing, so
// "https://example.com:443/" and "https://example.com/" compare equal.
fn same_network_location(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port() == b.port()
}

// Resolves a link (possibly relative) to an absolute URL
//
// Returns None for:
// - fragment-only links (#section)
// - mailto:, tel:, javascript:, data: links
// - anything that does not end up as http/https
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    let lower = href.to_ascii_lowercase();

    // Skip anchors and special protocols
    if href.is_empty()
        || href.starts_with('#')
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("javascript:")
        || lower.starts_with("data:")
    {
        return None;
    }

    // join() handles both absolute and relative hrefs
    let mut url = base.join(href).ok()?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    // /page and /page#section are the same page
    url.set_fragment(None);
    Some(url)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does base.join(href) do?
//    - Resolves href the way a browser would
//    - "/docs" on https://a.com/x/y becomes https://a.com/docs
//    - "docs" on https://a.com/x/y becomes https://a.com/x/docs
//    - An absolute href ("https://b.com/") is returned as-is
//
// 2. What is the `?` after .ok()?
//    - join() returns a Result; .ok() turns it into an Option
//    - In a function returning Option, `?` returns None early on None
//
// 3. Why filter_map?
//    - It maps and filters in one step
//    - Items that return None are dropped, Some(x) keeps x
//
// 4. Why compare host_str() and port() instead of the whole URL?
//    - Two pages on the same site have different paths
//    - We only care where the server lives, not which page it is
//
// 5. Why keep a Vec and a HashSet?
//    - The HashSet answers "seen it?" quickly
//    - The Vec keeps the order links appear on the page
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/page/").unwrap()
    }

    fn extract_links_from_html(html: &str, base: &Url) -> Vec<String> {
        extract_links(&Html::parse_document(html), base)
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a>"#;
        let links = extract_links_from_html(html, &base());
        assert_eq!(links, vec!["https://www.rust-lang.org/"]);
    }

    #[test]
    fn test_resolve_relative_links() {
        let html = r#"
            <a href="/docs">Docs</a>
            <a href="../about">About</a>
            <a href="child">Child</a>
        "#;
        let links = extract_links_from_html(html, &base());
        assert_eq!(
            links,
            vec![
                "https://example.com/docs",
                "https://example.com/about",
                "https://example.com/page/child",
            ]
        );
    }

    #[test]
    fn test_skip_special_links() {
        let html = r##"
            <a href="#section">Anchor</a>
            <a href="mailto:test@example.com">Email</a>
            <a href="tel:+123">Call</a>
            <a href="javascript:void(0)">JS</a>
            <a href="ftp://example.com/file">FTP</a>
        "##;
        let links = extract_links_from_html(html, &base());
        assert!(links.is_empty());
    }

    #[test]
    fn test_duplicates_removed_order_kept() {
        let html = r#"
            <a href="/b">B</a>
            <a href="/a">A</a>
            <a href="/b#top">B again</a>
            <a href="/a">A again</a>
        "#;
        let links = extract_links_from_html(html, &base());
        assert_eq!(links, vec!["https://example.com/b", "https://example.com/a"]);
    }

    #[test]
    fn test_same_site_filter_is_exact() {
        let origin = Url::parse("https://example.com/").unwrap();
        let links = vec![
            "https://example.com/one".to_string(),
            "https://blog.example.com/two".to_string(),
            "https://example.com:8443/three".to_string(),
            "http://example.com/four".to_string(),
            "https://other.org/".to_string(),
        ];
        let same: Vec<String> = same_site_links(&links, &origin)
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(
            same,
            vec!["https://example.com/one", "http://example.com/four"]
        );
    }

    #[test]
    fn test_default_port_matches() {
        let a = Url::parse("https://example.com:443/x").unwrap();
        let b = Url::parse("https://example.com/").unwrap();
        assert!(same_network_location(&a, &b));
    }
}
