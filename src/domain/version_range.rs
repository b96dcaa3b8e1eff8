//! Supported-versions ranges
//!
//! Parses the free-text range shown on a marketplace listing, e.g. `6.0-6.5`
//! or a single `7.0`, into a closed interval.

use super::Version;
use crate::error::VersionRangeError;
use std::fmt;

/// A closed interval of versions
///
/// `min` is the first token and `max` the last token of the description.
/// Nothing enforces `min <= max`; a reversed range simply contains nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    pub min: Version,
    pub max: Version,
}

impl VersionRange {
    /// Creates a range from explicit bounds
    pub fn new(min: Version, max: Version) -> Self {
        Self { min, max }
    }

    /// Parses `min-max` or a single version
    pub fn parse(text: &str) -> Result<Self, VersionRangeError> {
        let tokens: Vec<&str> = text.split('-').map(str::trim).collect();

        let parse_bound = |token: &str| {
            Version::parse(token).map_err(|source| VersionRangeError::InvalidBound {
                text: text.to_string(),
                source,
            })
        };

        match tokens.as_slice() {
            [single] => {
                let version = parse_bound(single)?;
                Ok(Self::new(version.clone(), version))
            }
            [min, max] => Ok(Self::new(parse_bound(min)?, parse_bound(max)?)),
            _ => Err(VersionRangeError::TokenCount {
                text: text.to_string(),
                count: tokens.len(),
            }),
        }
    }

    /// True iff `min <= version <= max`
    pub fn in_range(&self, version: &Version) -> bool {
        version >= &self.min && version <= &self.max
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min.as_str() == self.max.as_str() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}
