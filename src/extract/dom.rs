//! Small structural-query helpers shared by the page extractors.

use scraper::{ElementRef, Html, Selector};

/// Compiles a selector at static init; panics on an invalid pattern.
///
/// Selector strings are compile-time constants owned by this extraction
/// layer, so a failure here is a programming error, not an input error.
pub fn static_selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid static selector '{css}': {e}"))
}

/// Concatenated text content of an element, whitespace-collapsed and trimmed.
#[must_use]
pub fn collapsed_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    normalize_ws(&raw)
}

/// Collapses runs of whitespace (including non-breaking spaces) to single
/// spaces and trims the ends.
#[must_use]
pub fn normalize_ws(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Full text of the document, lowercased, for marker scans.
#[must_use]
pub fn document_text_lower(doc: &Html) -> String {
    let raw: String = doc.root_element().text().collect();
    raw.to_lowercase()
}

/// First `href` attribute among an element's descendants.
#[must_use]
pub fn first_href(element: ElementRef<'_>) -> Option<String> {
    let anchor = static_selector("a[href]");
    element
        .select(&anchor)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}
