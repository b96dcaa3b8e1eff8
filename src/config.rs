//! Run configuration
//!
//! A `ScrapeConfig` is resolved once from three layers, highest first:
//! command-line flags, an optional TOML file (`--config`), and the built-in
//! defaults below. It is immutable afterwards and handed to the orchestrator.

use crate::cli::CliArgs;
use crate::domain::Version;
use crate::error::ConfigError;
use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Marketplace site root
pub const DEFAULT_SITE_URL: &str = "https://www.cuba-platform.com";

/// Path of the listing page under the site root
pub const DEFAULT_LISTING_PATH: &str = "/marketplace";

/// Platform version listings are filtered against
pub const DEFAULT_TARGET_VERSION: &str = "7.0";

/// Report file, relative to the working directory
pub const DEFAULT_OUTPUT_PATH: &str = "output.json";

/// Timeout for the listing page request
pub const DEFAULT_LISTING_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Timeout for each detail page request
pub const DEFAULT_DETAIL_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Detail pages fetched at once
pub const DEFAULT_CONCURRENCY: usize = 1;

/// What to do when one listing hits a fetch or extraction fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the run and report the error
    #[default]
    Abort,
    /// Log the error, drop the listing and continue
    Skip,
}

/// Immutable settings for one scrape run
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Site root without a trailing slash
    pub site_url: String,
    /// Listing page path under the site root
    pub listing_path: String,
    /// Version listings are filtered against
    pub target_version: Version,
    /// Where the JSON report is written
    pub output_path: PathBuf,
    pub listing_timeout: Duration,
    pub detail_timeout: Duration,
    /// Maximum detail requests in flight
    pub concurrency: usize,
    pub failure_policy: FailurePolicy,
}

/// Optional TOML config file; keys mirror the long CLI flags
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub site_url: Option<String>,
    pub listing_path: Option<String>,
    pub target_version: Option<String>,
    pub output: Option<PathBuf>,
    /// Milliseconds
    pub listing_timeout: Option<u64>,
    /// Milliseconds
    pub detail_timeout: Option<u64>,
    pub concurrency: Option<usize>,
    pub on_failure: Option<FailurePolicy>,
}

impl FileConfig {
    /// Read and parse a config file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse config file content; `path` is only used for error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl ScrapeConfig {
    /// Create a configuration with default settings for `target_version`
    pub fn new(target_version: Version) -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            listing_path: DEFAULT_LISTING_PATH.to_string(),
            target_version,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            listing_timeout: DEFAULT_LISTING_TIMEOUT,
            detail_timeout: DEFAULT_DETAIL_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Set the site root; a trailing slash is dropped
    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the listing page path
    pub fn with_listing_path(mut self, listing_path: impl Into<String>) -> Self {
        self.listing_path = listing_path.into();
        self
    }

    /// Set the report path
    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    /// Set both request timeouts
    pub fn with_timeouts(mut self, listing: Duration, detail: Duration) -> Self {
        self.listing_timeout = listing;
        self.detail_timeout = detail;
        self
    }

    /// Set the number of detail requests in flight; at least one
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Resolve flags, the optional config file and defaults into a config
    pub fn resolve(args: &CliArgs) -> Result<Self, ConfigError> {
        if args.quiet && args.verbose {
            return Err(ConfigError::ConflictingOptions {
                message: "--quiet and --verbose cannot be used together".to_string(),
            });
        }

        let file = match &args.config {
            Some(path) => FileConfig::from_path(path)?,
            None => FileConfig::default(),
        };

        Self::merge(args, file)
    }

    /// Layer CLI values over file values over defaults, then validate
    pub fn merge(args: &CliArgs, file: FileConfig) -> Result<Self, ConfigError> {
        let target = args
            .target_version
            .clone()
            .or(file.target_version)
            .unwrap_or_else(|| DEFAULT_TARGET_VERSION.to_string());
        let target_version =
            Version::parse(&target).map_err(|source| ConfigError::InvalidTargetVersion {
                value: target.clone(),
                source,
            })?;

        let site_url = args
            .site_url
            .clone()
            .or(file.site_url)
            .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());
        if !(site_url.starts_with("http://") || site_url.starts_with("https://")) {
            return Err(ConfigError::InvalidSiteUrl { value: site_url });
        }

        let concurrency = args
            .concurrency
            .or(file.concurrency)
            .unwrap_or(DEFAULT_CONCURRENCY);
        if concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency { value: concurrency });
        }

        let listing_timeout = args
            .listing_timeout
            .or(file.listing_timeout)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_LISTING_TIMEOUT);
        let detail_timeout = args
            .detail_timeout
            .or(file.detail_timeout)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DETAIL_TIMEOUT);

        let mut config = Self::new(target_version)
            .with_site_url(site_url)
            .with_timeouts(listing_timeout, detail_timeout)
            .with_concurrency(concurrency)
            .with_failure_policy(args.on_failure.or(file.on_failure).unwrap_or_default());

        if let Some(path) = args.listing_path.clone().or(file.listing_path) {
            config = config.with_listing_path(path);
        }
        if let Some(output) = args.output.clone().or(file.output) {
            config = config.with_output_path(output);
        }

        Ok(config)
    }

    /// URL of the listing page
    pub fn listing_url(&self) -> String {
        format!("{}{}", self.site_url, self.listing_path)
    }

    /// URL of a detail page given the teaser link href
    pub fn detail_url(&self, detail_path: &str) -> String {
        format!("{}{}", self.site_url, detail_path)
    }
}
