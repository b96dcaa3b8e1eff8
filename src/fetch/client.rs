//! HTTP client for marketplace pages
//!
//! A thin wrapper over reqwest with:
//! - A fixed User-Agent
//! - A timeout chosen per request (listing and detail pages differ)
//! - Status and timeout errors mapped to `FetchError`
//!
//! Requests are never retried.

use super::PageFetcher;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("marketscrape/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, FetchError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with a custom User-Agent
    pub fn with_user_agent(user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Client {
                message: e.to_string(),
            })?;

        Ok(Self { client })
    }

    /// Perform a GET request and return the body text
    pub async fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        tracing::debug!(url, timeout_ms = timeout.as_millis() as u64, "GET");

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Self::map_send_error(url, timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::timeout(url, timeout)
                } else {
                    FetchError::Body {
                        url: url.to_string(),
                        message: e.to_string(),
                    }
                }
            })
    }

    fn map_send_error(url: &str, timeout: Duration, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::timeout(url, timeout)
        } else {
            FetchError::network(url, error.to_string())
        }
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        self.get_text(url, timeout).await
    }
}
