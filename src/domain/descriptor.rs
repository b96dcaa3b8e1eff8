//! Marketplace listing records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields taken from a listing's summary block on the index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSummary {
    /// Last path segment of the detail link
    pub id: String,
    /// Display title
    pub name: String,
    /// Teaser text, if any
    pub description: Option<String>,
    /// Star rating text ("0" when the block has none)
    pub rating: String,
    /// Detail link href, relative to the site root
    pub detail_path: String,
}

/// One marketplace component in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppComponentDescriptor {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub vendor: String,
    /// Milliseconds since the Unix epoch
    pub update_date_time: Option<i64>,
    pub rating: String,
    pub group_id: String,
    pub artifact_id: String,
    pub versions: Vec<String>,
}

/// Maven-style `group:artifact:version` coordinates from a detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl Coordinates {
    /// Split on ':' and keep the first three segments
    ///
    /// Returns None when there are fewer than three.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split(':');
        let group_id = parts.next()?;
        let artifact_id = parts.next()?;
        let version = parts.next()?;
        Some(Self {
            group_id: group_id.trim().to_string(),
            artifact_id: artifact_id.trim().to_string(),
            version: version.trim().to_string(),
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// Detail page fields needed to complete a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDetails {
    pub coordinates: Coordinates,
    pub vendor: String,
    pub category: String,
    pub update_date_time: Option<i64>,
    pub tags: Vec<String>,
}

impl AppComponentDescriptor {
    /// Combines the summary block fields with the detail page fields
    pub fn from_parts(summary: ListingSummary, details: ComponentDetails) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            description: summary.description,
            category: details.category,
            tags: details.tags,
            vendor: details.vendor,
            update_date_time: details.update_date_time,
            rating: summary.rating,
            group_id: details.coordinates.group_id,
            artifact_id: details.coordinates.artifact_id,
            versions: vec![details.coordinates.version],
        }
    }
}

impl fmt::Display for AppComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}:{}) by {}",
            self.name, self.group_id, self.artifact_id, self.vendor
        )
    }
}
