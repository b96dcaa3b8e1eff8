//! Scrape orchestrator coordinating the whole run
//!
//! This module provides:
//! - Workflow coordination: fetch listing → filter summaries → fetch details → report
//! - Bounded detail fetching that keeps source listing order
//! - Failure policy handling for per-listing faults

use crate::config::{FailurePolicy, ScrapeConfig};
use crate::domain::{ListingOutcome, ListingSummary, Report, SkipReason};
use crate::error::AppError;
use crate::extract::{DetailExtractor, ListingExtractor};
use crate::fetch::{HttpClient, PageFetcher};
use crate::progress::Progress;
use futures::stream::{self, StreamExt};
use std::pin::pin;
use tracing::{debug, info, warn};

/// Orchestrator for one scrape run
pub struct Orchestrator {
    config: ScrapeConfig,
    fetcher: Box<dyn PageFetcher>,
    listing: ListingExtractor,
    detail: DetailExtractor,
}

/// Counters for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Summary blocks found on the listing page
    pub listings: usize,
    /// Listings dropped because they already support the target version
    pub already_supported: usize,
    /// Listings dropped for a missing or malformed field
    pub skipped: usize,
    /// Listings that made it into the report
    pub accepted: usize,
    /// Listings dropped by a fault under `FailurePolicy::Skip`
    pub failed: usize,
}

/// Result of running the orchestrator
#[derive(Debug)]
pub struct PipelineResult {
    pub report: Report,
    pub stats: RunStats,
    /// Faults tolerated under `FailurePolicy::Skip`
    pub errors: Vec<AppError>,
}

impl Orchestrator {
    /// Create a new orchestrator fetching over HTTP
    pub fn new(config: ScrapeConfig) -> Result<Self, AppError> {
        let client = HttpClient::new()?;
        Ok(Self::with_fetcher(config, client))
    }

    /// Create an orchestrator with a custom page source
    pub fn with_fetcher(config: ScrapeConfig, fetcher: impl PageFetcher + 'static) -> Self {
        let listing = ListingExtractor::new(config.target_version.clone());
        Self {
            config,
            fetcher: Box::new(fetcher),
            listing,
            detail: DetailExtractor::new(),
        }
    }

    /// The configuration this run uses
    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Run the scrape without progress display
    pub async fn run(&self) -> Result<PipelineResult, AppError> {
        self.run_with_progress(false).await
    }

    /// Run the scrape with optional progress display
    pub async fn run_with_progress(&self, show_progress: bool) -> Result<PipelineResult, AppError> {
        let mut progress = Progress::new(show_progress);
        let mut stats = RunStats::default();
        let mut errors = Vec::new();

        // Step 1: Listing page; any fault here ends the run
        let listing_url = self.config.listing_url();
        progress.listing(&listing_url);
        info!(url = %listing_url, target = %self.listing.target(), "Fetching listing page");
        let html = self
            .fetcher
            .fetch(&listing_url, self.config.listing_timeout)
            .await?;

        // Step 2: Summary blocks and the version filter
        let summaries = self.collect_summaries(&html, &mut stats);
        info!(
            listings = stats.listings,
            candidates = summaries.len(),
            "Listing page parsed"
        );

        // Step 3: Detail pages, consumed in listing order
        progress.details(summaries.len());
        let mut descriptors = Vec::with_capacity(summaries.len());
        let mut outcomes = pin!(stream::iter(summaries)
            .map(|summary| self.process_listing(summary))
            .buffered(self.config.concurrency));

        while let Some(outcome) = outcomes.next().await {
            match outcome {
                ListingOutcome::Accepted(descriptor) => {
                    progress.advance(&descriptor.id);
                    debug!(id = %descriptor.id, "Listing accepted");
                    stats.accepted += 1;
                    descriptors.push(descriptor);
                }
                ListingOutcome::Skipped { id, reason } => {
                    progress.advance(&id);
                    debug!(id = %id, reason = %reason, "Listing skipped");
                    stats.skipped += 1;
                }
                ListingOutcome::Failed { id, error } => {
                    progress.advance(&id);
                    match self.config.failure_policy {
                        FailurePolicy::Abort => return Err(error),
                        FailurePolicy::Skip => {
                            warn!(id = %id, error = %error, "Dropping listing");
                            stats.failed += 1;
                            errors.push(error);
                        }
                    }
                }
            }
        }
        progress.clear();

        let report = Report::build(descriptors, self.config.target_version.to_string());
        info!(components = report.len(), "Report is ready");

        Ok(PipelineResult {
            report,
            stats,
            errors,
        })
    }

    /// Extract every summary block, keeping the ones that pass the filter
    fn collect_summaries(&self, html: &str, stats: &mut RunStats) -> Vec<ListingSummary> {
        let results = self.listing.extract_all(html);
        stats.listings = results.len();

        let mut summaries = Vec::new();
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(summary) => summaries.push(summary),
                Err(SkipReason::TargetVersionSupported) => stats.already_supported += 1,
                Err(reason) => {
                    debug!(index, reason = %reason, "Summary block skipped");
                    stats.skipped += 1;
                }
            }
        }
        summaries
    }

    /// Fetch one detail page and complete the listing
    async fn process_listing(&self, summary: ListingSummary) -> ListingOutcome {
        let url = self.config.detail_url(&summary.detail_path);
        let id = summary.id.clone();

        match self.fetcher.fetch(&url, self.config.detail_timeout).await {
            Ok(html) => ListingOutcome::from_extraction(&id, self.detail.extract(summary, &html)),
            Err(e) => ListingOutcome::Failed {
                id,
                error: e.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Version;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    const SITE: &str = "http://market.test";

    /// Serves canned pages keyed by URL
    struct StaticFetcher {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, FetchError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::http_status(url, 404))
        }
    }

    fn block(id: &str, range: &str) -> String {
        format!(
            r#"<div class="views-row">
                <div class="views-field-title"><h3>{id}</h3></div>
                <span>Supported versions: {range}</span>
                <a class="teaser-link" href="/marketplace/{id}">more</a>
            </div>"#
        )
    }

    fn detail(coords: &str) -> String {
        format!(
            r#"<html><body><div class="left-column">
                <input class="form-control" value="{coords}">
                <div class="field-name-field-addon-author-list"><div class="field-item">Acme</div></div>
                <div class="field-name-field-addon-category"><a>Tools</a></div>
            </div></body></html>"#
        )
    }

    fn orchestrator(pages: Vec<(String, String)>, policy: FailurePolicy) -> Orchestrator {
        let config = ScrapeConfig::new(Version::parse("7.0").unwrap())
            .with_site_url(SITE)
            .with_failure_policy(policy);
        let fetcher = StaticFetcher {
            pages: pages.into_iter().collect(),
        };
        Orchestrator::with_fetcher(config, fetcher)
    }

    fn listing_page(blocks: &[String]) -> (String, String) {
        (
            format!("{}/marketplace", SITE),
            format!("<html><body>{}</body></html>", blocks.concat()),
        )
    }

    fn detail_page(id: &str, html: String) -> (String, String) {
        (format!("{}/marketplace/{}", SITE, id), html)
    }

    #[tokio::test]
    async fn test_run_counts_outcomes() {
        let pages = vec![
            listing_page(&[
                block("old", "6.0-6.5"),
                block("current", "6.8-7.1"),
                block("broken", "6.0-6.5").replace("Supported versions", "Versions"),
                block("short", "6.0"),
            ]),
            detail_page("old", detail("com.acme:old:1.0")),
            detail_page("short", detail("com.acme:short")),
        ];
        let result = orchestrator(pages, FailurePolicy::Abort).run().await.unwrap();

        assert_eq!(result.report.len(), 1);
        assert_eq!(result.report.app_components[0].id, "old");
        assert_eq!(
            result.stats,
            RunStats {
                listings: 4,
                already_supported: 1,
                skipped: 2,
                accepted: 1,
                failed: 0,
            }
        );
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn test_listing_fetch_failure_is_fatal() {
        let err = orchestrator(Vec::new(), FailurePolicy::Skip)
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Fetch(FetchError::HttpStatus { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_detail_fetch_failure_aborts() {
        let pages = vec![listing_page(&[block("gone", "6.0")])];
        let err = orchestrator(pages, FailurePolicy::Abort)
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_detail_fetch_failure_skipped_under_skip_policy() {
        let pages = vec![
            listing_page(&[block("gone", "6.0"), block("kept", "6.0")]),
            detail_page("kept", detail("g:kept:2.0")),
        ];
        let result = orchestrator(pages, FailurePolicy::Skip).run().await.unwrap();
        assert_eq!(result.report.len(), 1);
        assert_eq!(result.stats.failed, 1);
        assert_eq!(result.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_listing_page() {
        let pages = vec![listing_page(&[])];
        let result = orchestrator(pages, FailurePolicy::Abort).run().await.unwrap();
        assert!(result.report.is_empty());
        assert_eq!(result.report.cuba_version, "7.0");
        assert_eq!(result.stats, RunStats::default());
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_completes() {
        let config = ScrapeConfig::new(Version::parse("7.0").unwrap())
            .with_site_url(SITE)
            .with_concurrency(0);
        let fetcher = StaticFetcher {
            pages: vec![
                listing_page(&[block("old", "6.0-6.5")]),
                detail_page("old", detail("com.acme:old:1.0")),
            ]
            .into_iter()
            .collect(),
        };
        let orch = Orchestrator::with_fetcher(config, fetcher);

        let result = tokio::time::timeout(Duration::from_secs(2), orch.run())
            .await
            .expect("run finished in time")
            .unwrap();
        assert_eq!(result.report.len(), 1);
    }

    #[test]
    fn test_config_accessor() {
        let orch = orchestrator(Vec::new(), FailurePolicy::Skip);
        assert_eq!(orch.config().failure_policy, FailurePolicy::Skip);
        assert_eq!(orch.config().listing_url(), "http://market.test/marketplace");
    }
}
