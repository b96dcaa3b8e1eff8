//! Listing page summary block extraction
//!
//! Each `div.views-row` block on the marketplace index describes one
//! component. A block passes only when its supported-versions range does
//! NOT contain the target version: the report lists components that still
//! need a compatibility update for that platform version.

use super::{element_text, select_text};
use crate::domain::{ListingSummary, SkipReason, Version, VersionRange};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Label preceding the range text in a summary block, matched ignoring case
const SUPPORTED_VERSIONS_PREFIX: &str = "Supported versions:";

static SUPPORTED_VERSIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i){}\s*(.*)$", regex::escape(SUPPORTED_VERSIONS_PREFIX))).unwrap()
});

static SUMMARY_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.views-row").unwrap());
static SPAN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.views-field-title h3").unwrap());
static BODY_PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.views-field-body p").unwrap());
static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.views-field-body").unwrap());
static RATING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.star.star-1 span").unwrap());
static TEASER_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.teaser-link").unwrap());

/// Default rating for blocks without a star element
const DEFAULT_RATING: &str = "0";

/// Extracts summaries from the listing page and applies the version filter
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    target: Version,
}

impl ListingExtractor {
    /// Create an extractor filtering against `target`
    pub fn new(target: Version) -> Self {
        Self { target }
    }

    /// The version listings are checked against
    pub fn target(&self) -> &Version {
        &self.target
    }

    /// Run extraction over every summary block, in document order
    pub fn extract_all(&self, html: &str) -> Vec<Result<ListingSummary, SkipReason>> {
        let document = Html::parse_document(html);
        document
            .select(&SUMMARY_BLOCK)
            .map(|block| self.extract(block))
            .collect()
    }

    /// Extract one summary block
    pub fn extract(&self, block: ElementRef<'_>) -> Result<ListingSummary, SkipReason> {
        let range = Self::supported_versions(block)?;
        if range.in_range(&self.target) {
            return Err(SkipReason::TargetVersionSupported);
        }

        let name = select_text(block, &TITLE).ok_or(SkipReason::MissingTitle)?;

        let description = block
            .select(&BODY_PARAGRAPH)
            .next()
            .or_else(|| block.select(&BODY).next())
            .map(element_text)
            .filter(|text| !text.is_empty());

        let rating = select_text(block, &RATING).unwrap_or_else(|| DEFAULT_RATING.to_string());

        let detail_path = block
            .select(&TEASER_LINK)
            .next()
            .and_then(|link| link.value().attr("href"))
            .map(str::trim)
            .ok_or(SkipReason::MissingDetailLink)?;
        let id = Self::listing_id(detail_path)?;

        Ok(ListingSummary {
            id,
            name,
            description,
            rating,
            detail_path: detail_path.to_string(),
        })
    }

    /// Find and parse the "Supported versions: <range>" fragment
    fn supported_versions(block: ElementRef<'_>) -> Result<VersionRange, SkipReason> {
        let range_text = block
            .select(&SPAN)
            .map(element_text)
            .find_map(|text| {
                SUPPORTED_VERSIONS_RE
                    .captures(&text)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().to_string())
            })
            .ok_or(SkipReason::MissingSupportedVersions)?;

        VersionRange::parse(&range_text).map_err(SkipReason::MalformedVersionRange)
    }

    /// `/marketplace/<id>` → `<id>`
    fn listing_id(href: &str) -> Result<String, SkipReason> {
        let segments: Vec<&str> = href.split('/').collect();
        match segments.as_slice() {
            [_, _, id] if !id.is_empty() => Ok((*id).to_string()),
            _ => Err(SkipReason::MalformedDetailLink(href.to_string())),
        }
    }
}
