//! Detail page extraction
//!
//! Every field lives under the page's `div.left-column`. A page without that
//! region, or with an update date that is present but not `YYYY-MM-DD`, is a
//! fault rather than a skip. Missing required fields skip the listing.

use super::{element_text, select_text};
use crate::domain::{
    AppComponentDescriptor, ComponentDetails, Coordinates, ListingSummary, Rejection, SkipReason,
};
use crate::error::ExtractError;
use chrono::{NaiveDate, NaiveTime};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Date format of the "updated" field
const UPDATE_DATE_FORMAT: &str = "%Y-%m-%d";

static LEFT_COLUMN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.left-column").unwrap());
static COORDINATES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input.form-control").unwrap());
static VENDOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.field-name-field-addon-author-list div.field-item").unwrap()
});
static CATEGORY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.field-name-field-addon-category a").unwrap());
static UPDATED: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.field-name-field-addon-updated span.date-display-single").unwrap()
});
static TAGS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.field-name-field-addon-tags").unwrap());
static TAG_ITEMS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.field-items").unwrap());
static TAG_LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.field-item a").unwrap());

/// Extracts extended metadata from a listing's detail page
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailExtractor;

impl DetailExtractor {
    /// Create a new detail extractor
    pub fn new() -> Self {
        Self
    }

    /// Complete a summary into a descriptor using its detail page
    pub fn extract(
        &self,
        summary: ListingSummary,
        html: &str,
    ) -> Result<AppComponentDescriptor, Rejection> {
        let details = self.extract_details(&summary.id, html)?;
        Ok(AppComponentDescriptor::from_parts(summary, details))
    }

    /// Extract the detail page fields for listing `id`
    pub fn extract_details(&self, id: &str, html: &str) -> Result<ComponentDetails, Rejection> {
        let document = Html::parse_document(html);
        let left_column = document
            .select(&LEFT_COLUMN)
            .next()
            .ok_or_else(|| ExtractError::missing_left_column(id))?;

        let raw_coordinates = left_column
            .select(&COORDINATES)
            .next()
            .and_then(|input| input.value().attr("value"))
            .ok_or(SkipReason::MissingCoordinates)?;
        let coordinates = Coordinates::parse(raw_coordinates)
            .ok_or_else(|| SkipReason::MalformedCoordinates(raw_coordinates.to_string()))?;

        let vendor = select_text(left_column, &VENDOR).ok_or(SkipReason::MissingVendor)?;
        let category = select_text(left_column, &CATEGORY).ok_or(SkipReason::MissingCategory)?;
        let update_date_time = Self::update_date_time(id, left_column)?;
        let tags = Self::tags(left_column);

        Ok(ComponentDetails {
            coordinates,
            vendor,
            category,
            update_date_time,
            tags,
        })
    }

    /// Milliseconds since epoch of the update date at UTC midnight
    fn update_date_time(id: &str, left_column: ElementRef<'_>) -> Result<Option<i64>, ExtractError> {
        let Some(text) = left_column.select(&UPDATED).next().map(element_text) else {
            return Ok(None);
        };

        let date = parse_update_date(&text)
            .map_err(|e| ExtractError::invalid_date(id, &text, e.to_string()))?;
        Ok(Some(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()))
    }

    /// Tag link texts; any missing level yields no tags
    fn tags(left_column: ElementRef<'_>) -> Vec<String> {
        left_column
            .select(&TAGS)
            .next()
            .and_then(|tags| tags.select(&TAG_ITEMS).next())
            .map(|items| items.select(&TAG_LINKS).map(element_text).collect())
            .unwrap_or_default()
    }
}

fn parse_update_date(text: &str) -> chrono::ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(text, UPDATE_DATE_FORMAT)
}
