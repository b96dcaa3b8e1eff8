//! Output for a finished run
//!
//! This module provides:
//! - The JSON report file
//! - The console summary

mod json;
mod text;

pub use json::{file_url, report_to_json, write_report};
pub use text::TextSummary;
