//! CLI argument parsing module for marketscrape
//!
//! Every option is optional so that a config file can fill the gaps; the
//! built-in defaults live in `config`.

use crate::config::FailurePolicy;
use clap::Parser;
use std::path::PathBuf;

/// Marketplace add-on compatibility scraper
#[derive(Parser, Debug, Clone)]
#[command(
    name = "marketscrape",
    version,
    about = "Report marketplace add-ons that do not support a platform version"
)]
pub struct CliArgs {
    /// Marketplace site root [default: https://www.cuba-platform.com]
    #[arg(long, value_name = "URL")]
    pub site_url: Option<String>,

    /// Listing page path under the site root [default: /marketplace]
    #[arg(long, value_name = "PATH")]
    pub listing_path: Option<String>,

    /// Platform version to check listings against [default: 7.0]
    #[arg(short = 't', long, value_name = "VERSION")]
    pub target_version: Option<String>,

    /// Report file [default: output.json]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Listing page timeout in milliseconds [default: 10000]
    #[arg(long, value_name = "MS")]
    pub listing_timeout: Option<u64>,

    /// Detail page timeout in milliseconds [default: 5000]
    #[arg(long, value_name = "MS")]
    pub detail_timeout: Option<u64>,

    /// Detail pages fetched at once [default: 1]
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// What to do when a listing's detail page cannot be handled [default: abort]
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_failure: Option<FailurePolicy>,

    /// TOML config file with the same keys as the long options
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(long)]
    pub verbose: bool,

    /// Quiet mode - no progress display, warnings and errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Log level directive for the tracing filter
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Filter directive to add on top of `RUST_LOG`
    ///
    /// A user-set `RUST_LOG` is left alone unless `--verbose` or `--quiet`
    /// asks for a level explicitly.
    pub fn log_directive(&self, rust_log_set: bool) -> Option<String> {
        if rust_log_set && !self.verbose && !self.quiet {
            return None;
        }
        Some(format!("marketscrape={}", self.log_level()))
    }

    /// Whether the progress display should be shown
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
