//! marketscrape - Marketplace add-on compatibility scraper library
//!
//! This library provides the pieces of a one-shot scrape:
//! - Dotted version comparison and supported-versions ranges
//! - Listing page and detail page field extraction
//! - A page fetching seam with a reqwest implementation
//! - The orchestrator that filters listings and builds the report
//! - JSON report output

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod orchestrator;
pub mod output;
pub mod progress;
