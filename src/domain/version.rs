//! Dotted numeric platform versions
//!
//! Versions are compared segment by segment as unsigned integers. When the
//! segment counts differ the shorter version is padded with zeros, so
//! `7`, `7.0` and `7.0.0` are all equal and `7` sorts before `7.0.1`.

use crate::error::VersionError;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A dotted numeric version such as `7.0.1`
#[derive(Debug, Clone)]
pub struct Version {
    /// Text as it appeared in the source
    raw: String,
    /// Parsed numeric segments
    segments: Vec<u64>,
}

impl Version {
    /// Parse a version, rejecting empty and non-numeric segments
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let segments = trimmed
            .split('.')
            .map(|part| {
                // u64::from_str would also take a leading '+'
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(VersionError::invalid_segment(trimmed, part));
                }
                part.parse::<u64>()
                    .map_err(|_| VersionError::invalid_segment(trimmed, part))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: trimmed.to_string(),
            segments,
        })
    }

    /// The version text without surrounding whitespace
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The numeric segments
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let a = self.segments.get(i).copied().unwrap_or(0);
            let b = other.segments.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality follows the padded ordering, not the raw text.
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Three-way comparison of two dotted version strings
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering, VersionError> {
    Ok(Version::parse(a)?.cmp(&Version::parse(b)?))
}
