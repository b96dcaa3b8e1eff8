//! JSON report output
//!
//! The report is pretty-printed with camelCase keys and written in one go.

use crate::domain::Report;
use crate::error::OutputError;
use std::path::{Path, PathBuf};

/// Serialize the report as pretty-printed JSON
pub fn report_to_json(report: &Report) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report).map_err(|e| OutputError::Serialize {
        message: e.to_string(),
    })
}

/// Write the report to `path` and return the absolute path written
pub fn write_report(report: &Report, path: &Path) -> Result<PathBuf, OutputError> {
    let mut json = report_to_json(report)?;
    json.push('\n');

    std::fs::write(path, json).map_err(|e| OutputError::write(path, e))?;
    std::path::absolute(path).map_err(|e| OutputError::write(path, e))
}

/// `file:///` URL for an absolute path, with backslashes turned into slashes
pub fn file_url(path: &Path) -> String {
    let normalized = path.display().to_string().replace('\\', "/");
    format!("file:///{}", normalized.trim_start_matches('/'))
}
