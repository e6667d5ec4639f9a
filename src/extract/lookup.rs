// src/extract/lookup.rs
// =============================================================================
// Ordered selector lookups shared by every extractor.
//
// A field is described as a list of lookups, each one a CSS selector plus
// "how do I read the value once it matched". We try them in order and keep
// the first non-empty value. Adding a new place to look for the author is
// one more line in a list, not a new function.
// =============================================================================

use scraper::{ElementRef, Html, Selector};

// Elements whose text is never page content
const INVISIBLE: [&str; 4] = ["script", "style", "noscript", "template"];

// How to read a value once a selector matched
#[derive(Debug, Clone, Copy)]
pub(super) enum Read {
    /// The `content` attribute (for <meta> tags)
    Content,
    /// A named attribute
    Attr(&'static str),
    /// The element's visible text
    Text,
}

// One entry in a strategy list: a CSS selector plus how to read it
#[derive(Debug, Clone, Copy)]
pub(super) struct Lookup {
    pub css: &'static str,
    pub read: Read,
}

impl Lookup {
    pub const fn attr(css: &'static str, name: &'static str) -> Self {
        Lookup {
            css,
            read: Read::Attr(name),
        }
    }
}

pub(super) const fn meta(css: &'static str) -> Lookup {
    Lookup {
        css,
        read: Read::Content,
    }
}

pub(super) const fn text(css: &'static str) -> Lookup {
    Lookup {
        css,
        read: Read::Text,
    }
}

// Walks a strategy list and returns the first non-empty value
pub(super) fn first_match(document: &Html, lookups: &[Lookup]) -> String {
    for lookup in lookups {
        // An unparsable selector is skipped, not fatal
        let Ok(selector) = Selector::parse(lookup.css) else {
            continue;
        };

        for element in document.select(&selector) {
            let value = read_value(element, lookup.read);
            if !value.is_empty() {
                return value;
            }
        }
    }

    String::new()
}

fn read_value(element: ElementRef, read: Read) -> String {
    match read {
        Read::Content => element.value().attr("content").unwrap_or("").trim().to_string(),
        Read::Attr(name) => element.value().attr(name).unwrap_or("").trim().to_string(),
        Read::Text => visible_text(element),
    }
}

// Collects the text under an element with whitespace collapsed,
// skipping anything inside <script>, <style> and friends
pub(super) fn visible_text(element: ElementRef) -> String {
    let mut words: Vec<&str> = Vec::new();

    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |el| INVISIBLE.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        words.extend(text.split_whitespace());
    }

    words.join(" ")
}
