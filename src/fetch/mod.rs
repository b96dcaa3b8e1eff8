//! Page fetching for the marketplace
//!
//! This module provides:
//! - The `PageFetcher` seam used by the orchestrator
//! - A reqwest-backed HTTP client with per-request timeouts

mod client;

pub use client::HttpClient;

use crate::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;

/// Source of HTML pages
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its body as text, failing after `timeout`
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;
}
