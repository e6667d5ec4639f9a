// src/extract/product.rs
// =============================================================================
// Pulls shop data out of a product page: name, price, brand, photos, specs.
//
// Same idea as metadata.rs: every field is an ordered list of selectors and
// the first non-empty match wins.
// =============================================================================

use super::lookup::{first_match, text, visible_text, Lookup};
use crate::record::ProductDetails;
use scraper::{Html, Selector};
use std::collections::{BTreeMap, HashSet};
use url::Url;

const NAME: &[Lookup] = &[
    text("h1"),
    text(".product-title"),
    text(".product-name"),
    text(".title"),
];

const PRICE: &[Lookup] = &[
    text(".price"),
    text(".product-price"),
    text(".current-price"),
    text(".amount"),
];

const DESCRIPTION: &[Lookup] = &[
    text(".description"),
    text(".product-description"),
    text(".content"),
];

const CATEGORY: &[Lookup] = &[
    text(".category"),
    text(".breadcrumb a"),
    text(".category-link"),
];

const BRAND: &[Lookup] = &[text(".brand"), text(".manufacturer"), text(".vendor")];

const AVAILABILITY: &[Lookup] = &[
    text(".availability"),
    text(".stock"),
    text(".in-stock"),
    text(".out-of-stock"),
];

const IMAGES: [&str; 3] = [".product-image img", ".gallery img", ".image img"];

const SPEC_TABLES: [&str; 3] = [".specifications", ".specs", ".attributes"];

const UNKNOWN_AVAILABILITY: &str = "Unknown";

pub fn extract_product(html: &str, base: &Url) -> ProductDetails {
    let document = Html::parse_document(html);

    let mut availability = first_match(&document, AVAILABILITY);
    if availability.is_empty() {
        availability = UNKNOWN_AVAILABILITY.to_string();
    }

    ProductDetails {
        name: first_match(&document, NAME),
        price: first_match(&document, PRICE),
        description: first_match(&document, DESCRIPTION),
        category: first_match(&document, CATEGORY),
        brand: first_match(&document, BRAND),
        availability,
        images: product_images(&document, base),
        specifications: specifications(&document),
    }
}

// Lazy-loaded galleries keep the real URL in data-src
fn product_images(document: &Html, base: &Url) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut images = Vec::new();

    for css in IMAGES {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };

        for img in document.select(&selector) {
            let element = img.value();
            let src = element
                .attr("src")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .or_else(|| element.attr("data-src").map(str::trim))
                .filter(|s| !s.is_empty());

            let Some(url) = src.and_then(|s| base.join(s).ok()) else {
                continue;
            };
            let url = url.to_string();
            if seen.insert(url.clone()) {
                images.push(url);
            }
        }
    }

    images
}

// Reads "key: value" rows (<tr>, <li> or <div>) from every spec table
//
// Later rows with the same key overwrite earlier ones.
fn specifications(document: &Html) -> BTreeMap<String, String> {
    let mut specs = BTreeMap::new();
    let Ok(row_selector) = Selector::parse("tr, li, div") else {
        return specs;
    };

    for css in SPEC_TABLES {
        let Ok(table_selector) = Selector::parse(css) else {
            continue;
        };
        let Some(table) = document.select(&table_selector).next() else {
            continue;
        };

        for row in table.select(&row_selector) {
            let line = visible_text(row);
            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim();
                if !key.is_empty() {
                    specs.insert(key.to_string(), value.trim().to_string());
                }
            }
        }
    }

    specs
}
