//! Core domain models for marketscrape
//!
//! This module contains the fundamental types used throughout the application:
//! - Dotted versions and supported-versions ranges
//! - Listing summaries and component descriptors
//! - Per-listing outcomes and skip reasons
//! - The report aggregate

mod descriptor;
mod outcome;
mod report;
mod version;
mod version_range;

pub use descriptor::{AppComponentDescriptor, ComponentDetails, Coordinates, ListingSummary};
pub use outcome::{ListingOutcome, Rejection, SkipReason};
pub use report::Report;
pub use version::{compare_versions, Version};
pub use version_range::VersionRange;
