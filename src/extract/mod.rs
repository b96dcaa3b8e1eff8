//! HTML field extraction for marketplace pages
//!
//! This module provides:
//! - Summary block extraction and version filtering for the listing page
//! - Extended metadata extraction for detail pages
//! - Shared text helpers over `scraper` elements

mod detail;
mod listing;

pub use detail::DetailExtractor;
pub use listing::ListingExtractor;

use scraper::{ElementRef, Selector};

/// Text content of an element with whitespace runs collapsed and trimmed
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of the first match under `scope`, or None if absent or blank
pub(crate) fn select_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}
