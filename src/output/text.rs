//! Console summary printed after the report is written

use crate::orchestrator::PipelineResult;
use crate::output::file_url;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Human-readable run summary
pub struct TextSummary {
    /// Also print run counters and tolerated errors
    verbose: bool,
}

impl TextSummary {
    /// Create a new summary printer
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Write the summary for `result`, whose report was written to `path`
    pub fn format(
        &self,
        result: &PipelineResult,
        path: &Path,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(
            writer,
            "Report is ready, {} descriptors were created",
            result.report.len().to_string().green().bold()
        )?;
        writeln!(writer, "Output file: {}", file_url(path))?;

        if self.verbose {
            let stats = &result.stats;
            writeln!(writer)?;
            writeln!(writer, "Listings found:     {}", stats.listings)?;
            writeln!(writer, "Already supported:  {}", stats.already_supported)?;
            writeln!(writer, "Skipped:            {}", stats.skipped)?;
            writeln!(writer, "Failed:             {}", stats.failed)?;

            if !result.errors.is_empty() {
                writeln!(writer)?;
                writeln!(writer, "{}", "Errors encountered:".yellow())?;
                for error in &result.errors {
                    writeln!(writer, "  - {}", error)?;
                }
            }
        }

        Ok(())
    }
}
