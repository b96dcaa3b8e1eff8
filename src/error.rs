//! Application error types using thiserror
//!
//! Error hierarchy:
//! - VersionError / VersionRangeError: Issues with dotted version text
//! - FetchError: Issues with marketplace page requests
//! - ExtractError: Faults in a detail page that stop a listing outright
//! - ConfigError: Issues with CLI or config file values
//! - OutputError: Failures writing the JSON report

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Page request related errors
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Detail page extraction faults
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Report output related errors
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Errors raised while parsing a dotted version string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Empty version text
    #[error("empty version string")]
    Empty,

    /// A segment that is not an unsigned integer
    #[error("invalid segment '{segment}' in version '{version}'")]
    InvalidSegment { version: String, segment: String },
}

/// Errors raised while parsing a supported-versions range description
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionRangeError {
    /// Range text split into something other than one or two tokens
    #[error("expected 1 or 2 versions in range '{text}', found {count}")]
    TokenCount { text: String, count: usize },

    /// One of the range bounds is not a version
    #[error("invalid version in range '{text}': {source}")]
    InvalidBound {
        text: String,
        #[source]
        source: VersionError,
    },
}

/// Errors related to fetching marketplace pages
#[derive(Error, Debug)]
pub enum FetchError {
    /// Request did not finish in time
    #[error("timeout after {}ms while fetching {url}", .timeout.as_millis())]
    Timeout { url: String, timeout: Duration },

    /// Connection or protocol failure
    #[error("failed to fetch {url}: {message}")]
    Network { url: String, message: String },

    /// Server answered with a non-success status
    #[error("unexpected HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// Response body could not be read as text
    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },

    /// HTTP client could not be constructed
    #[error("failed to create HTTP client: {message}")]
    Client { message: String },
}

/// Detail page faults that cannot be treated as a missing field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The detail page has no left column region at all
    #[error("detail page for '{id}' has no left column")]
    MissingLeftColumn { id: String },

    /// The update date is present but not in YYYY-MM-DD form
    #[error("invalid update date '{value}' for '{id}': {message}")]
    InvalidDate {
        id: String,
        value: String,
        message: String,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Target version is not a dotted numeric version
    #[error("invalid target version '{value}': {source}")]
    InvalidTargetVersion {
        value: String,
        #[source]
        source: VersionError,
    },

    /// Concurrency must be at least one
    #[error("invalid concurrency '{value}': expected a number greater than zero")]
    InvalidConcurrency { value: usize },

    /// Site URL is not an absolute http(s) URL
    #[error("invalid site URL '{value}': expected an http:// or https:// URL")]
    InvalidSiteUrl { value: String },

    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this tool
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

/// Errors related to writing the report
#[derive(Error, Debug)]
pub enum OutputError {
    /// Report could not be serialized
    #[error("failed to serialize report: {message}")]
    Serialize { message: String },

    /// Report file could not be written
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VersionError {
    /// Creates a new InvalidSegment error
    pub fn invalid_segment(version: impl Into<String>, segment: impl Into<String>) -> Self {
        VersionError::InvalidSegment {
            version: version.into(),
            segment: segment.into(),
        }
    }
}

impl FetchError {
    /// Creates a new Timeout error
    pub fn timeout(url: impl Into<String>, timeout: Duration) -> Self {
        FetchError::Timeout {
            url: url.into(),
            timeout,
        }
    }

    /// Creates a new Network error
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        FetchError::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new HttpStatus error
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        FetchError::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Returns the URL the failed request was made to, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::Timeout { url, .. }
            | FetchError::Network { url, .. }
            | FetchError::HttpStatus { url, .. }
            | FetchError::Body { url, .. } => Some(url),
            FetchError::Client { .. } => None,
        }
    }
}

impl ExtractError {
    /// Creates a new MissingLeftColumn error
    pub fn missing_left_column(id: impl Into<String>) -> Self {
        ExtractError::MissingLeftColumn { id: id.into() }
    }

    /// Creates a new InvalidDate error
    pub fn invalid_date(
        id: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ExtractError::InvalidDate {
            id: id.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

impl OutputError {
    /// Creates a new Write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OutputError::Write {
            path: path.into(),
            source,
        }
    }
}
