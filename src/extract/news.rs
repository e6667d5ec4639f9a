// src/extract/news.rs
// =============================================================================
// Finds article links on a news category page.
//
// News sites list their articles in a handful of common shapes: a
// .news-item card, a headline <h2><a>, a .title link. We try the same
// ordered list of selectors and collect the article URLs they point at.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

const ARTICLE_LINKS: [&str; 6] = [
    ".news-item a",
    ".article-item a",
    ".post-item a",
    "h2 a",
    "h3 a",
    ".title a",
];

// Collects article URLs from a category page
//
// Only hrefs that start with "http" or "/" count as articles; things like
// "#comments" or "javascript:" are skipped. Results follow selector order
// first and document order second, each URL at most once.
pub fn article_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut articles = Vec::new();

    for css in ARTICLE_LINKS {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };

        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href").map(str::trim) else {
                continue;
            };
            if !(href.starts_with("http") || href.starts_with('/')) {
                continue;
            }

            let Ok(mut url) = base.join(href) else {
                continue;
            };
            url.set_fragment(None);

            if seen.insert(url.as_str().to_string()) {
                articles.push(url);
            }
        }
    }

    articles
}
