//! Report aggregate written at the end of a run

use super::AppComponentDescriptor;
use serde::{Deserialize, Serialize};

/// All accepted components plus the version they were checked against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub app_components: Vec<AppComponentDescriptor>,
    pub cuba_version: String,
}

impl Report {
    /// Wraps the descriptors without further validation
    pub fn build(descriptors: Vec<AppComponentDescriptor>, target_version: impl Into<String>) -> Self {
        Self {
            app_components: descriptors,
            cuba_version: target_version.into(),
        }
    }

    /// Number of descriptors in the report
    pub fn len(&self) -> usize {
        self.app_components.len()
    }

    /// Returns true if no component was accepted
    pub fn is_empty(&self) -> bool {
        self.app_components.is_empty()
    }
}
