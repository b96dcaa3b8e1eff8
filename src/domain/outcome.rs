//! Per-listing extraction results

use super::AppComponentDescriptor;
use crate::error::{AppError, ExtractError, VersionRangeError};
use std::fmt;

/// Reason a listing was dropped without an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No "Supported versions" text in the summary block
    MissingSupportedVersions,
    /// Supported versions text is not a usable range
    MalformedVersionRange(VersionRangeError),
    /// The listing already supports the target version
    TargetVersionSupported,
    /// Summary block has no title
    MissingTitle,
    /// Summary block has no teaser link
    MissingDetailLink,
    /// Teaser link is not of the form `/section/id`
    MalformedDetailLink(String),
    /// Detail page has no coordinates input
    MissingCoordinates,
    /// Coordinates have fewer than three segments
    MalformedCoordinates(String),
    /// Detail page has no author
    MissingVendor,
    /// Detail page has no category
    MissingCategory,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingSupportedVersions => write!(f, "no supported versions"),
            SkipReason::MalformedVersionRange(e) => write!(f, "malformed version range: {}", e),
            SkipReason::TargetVersionSupported => write!(f, "target version already supported"),
            SkipReason::MissingTitle => write!(f, "no title"),
            SkipReason::MissingDetailLink => write!(f, "no detail link"),
            SkipReason::MalformedDetailLink(href) => write!(f, "malformed detail link '{}'", href),
            SkipReason::MissingCoordinates => write!(f, "no coordinates"),
            SkipReason::MalformedCoordinates(value) => {
                write!(f, "malformed coordinates '{}'", value)
            }
            SkipReason::MissingVendor => write!(f, "no vendor"),
            SkipReason::MissingCategory => write!(f, "no category"),
        }
    }
}

/// Why detail extraction did not produce a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// A required field is absent; drop the listing
    Skip(SkipReason),
    /// The page is broken in a way that is not a missing field
    Fatal(ExtractError),
}

impl From<SkipReason> for Rejection {
    fn from(reason: SkipReason) -> Self {
        Rejection::Skip(reason)
    }
}

impl From<ExtractError> for Rejection {
    fn from(error: ExtractError) -> Self {
        Rejection::Fatal(error)
    }
}

/// Final result for one accepted summary after its detail page is handled
#[derive(Debug)]
pub enum ListingOutcome {
    /// Descriptor ready for the report
    Accepted(AppComponentDescriptor),
    /// Listing dropped because a required field is absent
    Skipped { id: String, reason: SkipReason },
    /// Detail fetch or extraction fault
    Failed { id: String, error: AppError },
}

impl ListingOutcome {
    /// Builds an outcome from a detail extraction result
    pub fn from_extraction(id: &str, result: Result<AppComponentDescriptor, Rejection>) -> Self {
        match result {
            Ok(descriptor) => ListingOutcome::Accepted(descriptor),
            Err(Rejection::Skip(reason)) => ListingOutcome::Skipped {
                id: id.to_string(),
                reason,
            },
            Err(Rejection::Fatal(error)) => ListingOutcome::Failed {
                id: id.to_string(),
                error: error.into(),
            },
        }
    }

    /// Returns true if this outcome carries a descriptor
    pub fn is_accepted(&self) -> bool {
        matches!(self, ListingOutcome::Accepted(_))
    }
}
