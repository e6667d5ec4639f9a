// src/extract/mod.rs
// =============================================================================
// This module turns downloaded HTML into data.
//
// Submodules:
// - links: finds <a href> links, resolves them, filters to the same site
// - lookup: ordered selector lists shared by the extractors below
// - metadata: title, body text, description, author, dates, images, headings
// - news: article links on a news category page
// - product: name, price, photos and specs of a shop product page
//
// All of them are pure functions over a string: no network, no state.
// =============================================================================

mod links;
mod lookup;
mod metadata;
mod news;
mod product;

pub use links::same_site_links;
pub use metadata::extract_metadata;
pub use news::article_links;
pub use product::extract_product;
