//! Integration tests for marketscrape
//!
//! These tests verify:
//! - The full listing → detail → report pipeline over canned pages
//! - Failure policy handling for broken detail pages
//! - Source order is kept when detail pages are fetched concurrently
//! - The written report decodes back to the in-memory report

use async_trait::async_trait;
use marketscrape::config::{FailurePolicy, ScrapeConfig};
use marketscrape::domain::{Report, Version};
use marketscrape::error::{AppError, ExtractError, FetchError};
use marketscrape::fetch::PageFetcher;
use marketscrape::orchestrator::Orchestrator;
use marketscrape::output::write_report;
use std::collections::HashMap;
use std::time::Duration;

const SITE: &str = "http://marketplace.test";

/// Serves canned pages; optional per-URL delay to shuffle completion order
#[derive(Default)]
struct FakeMarketplace {
    pages: HashMap<String, String>,
    delays: HashMap<String, Duration>,
}

impl FakeMarketplace {
    fn with_listing(mut self, blocks: &[String]) -> Self {
        self.pages.insert(
            format!("{}/marketplace", SITE),
            format!(
                "<html><body><div class=\"view-content\">{}</div></body></html>",
                blocks.concat()
            ),
        );
        self
    }

    fn with_detail(mut self, id: &str, html: String) -> Self {
        self.pages
            .insert(format!("{}/marketplace/{}", SITE, id), html);
        self
    }

    fn with_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays
            .insert(format!("{}/marketplace/{}", SITE, id), delay);
        self
    }
}

#[async_trait]
impl PageFetcher for FakeMarketplace {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, FetchError> {
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::http_status(url, 404))
    }
}

fn summary_block(id: &str, title: &str, range: &str) -> String {
    format!(
        r#"<div class="views-row">
            <div class="views-field-title"><h3>{title}</h3></div>
            <div class="views-field-body"><p>About {title}</p></div>
            <div class="views-field-field-versions"><span class="field-content">Supported versions: {range}</span></div>
            <a class="teaser-link" href="/marketplace/{id}"></a>
        </div>"#
    )
}

fn detail_page(coordinates: &str, vendor: &str, category: &str, extra: &str) -> String {
    format!(
        r#"<html><body>
        <div class="right-column"><input class="form-control" value="wrong:column:0"></div>
        <div class="left-column">
            <div class="form-group"><input class="form-control" type="text" readonly value="{coordinates}"></div>
            <div class="field field-name-field-addon-author-list"><div class="field-items"><div class="field-item even">{vendor}</div></div></div>
            <div class="field field-name-field-addon-category"><div class="field-items"><div class="field-item"><a href="/c">{category}</a></div></div></div>
            {extra}
        </div>
        </body></html>"#
    )
}

fn config(target: &str) -> ScrapeConfig {
    ScrapeConfig::new(Version::parse(target).unwrap()).with_site_url(SITE)
}

mod pipeline {
    use super::*;

    #[tokio::test]
    async fn test_single_listing_end_to_end() {
        let market = FakeMarketplace::default()
            .with_listing(&[summary_block("addon", "Acme Addon", "6.0-6.5")])
            .with_detail("addon", detail_page("com.acme:addon:1.2.3", "Acme", "Tools", ""));

        let result = Orchestrator::with_fetcher(config("7.0"), market)
            .run()
            .await
            .unwrap();

        let report = result.report;
        assert_eq!(report.cuba_version, "7.0");
        assert_eq!(report.app_components.len(), 1);

        let component = &report.app_components[0];
        assert_eq!(component.id, "addon");
        assert_eq!(component.name, "Acme Addon");
        assert_eq!(component.description.as_deref(), Some("About Acme Addon"));
        assert_eq!(component.group_id, "com.acme");
        assert_eq!(component.artifact_id, "addon");
        assert_eq!(component.versions, vec!["1.2.3"]);
        assert_eq!(component.vendor, "Acme");
        assert_eq!(component.category, "Tools");
        assert!(component.tags.is_empty());
        assert_eq!(component.update_date_time, None);
        assert_eq!(component.rating, "0");
    }

    #[tokio::test]
    async fn test_listings_supporting_target_are_excluded() {
        let market = FakeMarketplace::default()
            .with_listing(&[
                summary_block("legacy", "Legacy", "6.8-6.10"),
                summary_block("modern", "Modern", "7.0-7.2"),
                summary_block("exact", "Exact", "7.0"),
            ])
            .with_detail("legacy", detail_page("g:legacy:1.0", "V", "C", ""))
            .with_detail("modern", detail_page("g:modern:1.0", "V", "C", ""))
            .with_detail("exact", detail_page("g:exact:1.0", "V", "C", ""));

        let result = Orchestrator::with_fetcher(config("7.0"), market)
            .run()
            .await
            .unwrap();

        let ids: Vec<&str> = result
            .report
            .app_components
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["legacy"]);
        assert_eq!(result.stats.already_supported, 2);
    }

    #[tokio::test]
    async fn test_full_detail_fields() {
        let extra = r#"
            <div class="field-name-field-addon-updated"><div class="field-items"><span class="date-display-single">2019-05-12</span></div></div>
            <div class="field-name-field-addon-tags"><div class="field-items">
                <div class="field-item"><a href="/t/ui">UI</a></div>
                <div class="field-item"><a href="/t/charts">Charts</a></div>
            </div></div>"#;
        let market = FakeMarketplace::default()
            .with_listing(&[summary_block("charts", "Charts", "6.5")])
            .with_detail("charts", detail_page("com.haulmont:charts:6.5.2", "Haulmont", "UI", extra));

        let result = Orchestrator::with_fetcher(config("7.0"), market)
            .run()
            .await
            .unwrap();

        let component = &result.report.app_components[0];
        assert_eq!(component.tags, vec!["UI", "Charts"]);
        assert_eq!(component.update_date_time, Some(1_557_619_200_000));
    }

    #[tokio::test]
    async fn test_missing_left_column_aborts_run() {
        let market = FakeMarketplace::default()
            .with_listing(&[
                summary_block("broken", "Broken", "6.0"),
                summary_block("fine", "Fine", "6.0"),
            ])
            .with_detail("broken", "<html><body><p>Maintenance</p></body></html>".to_string())
            .with_detail("fine", detail_page("g:fine:1.0", "V", "C", ""));

        let err = Orchestrator::with_fetcher(config("7.0"), market)
            .run()
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Extract(ExtractError::MissingLeftColumn { ref id }) if id == "broken"
        ));
    }

    #[tokio::test]
    async fn test_missing_left_column_skipped_under_skip_policy() {
        let market = FakeMarketplace::default()
            .with_listing(&[
                summary_block("broken", "Broken", "6.0"),
                summary_block("fine", "Fine", "6.0"),
            ])
            .with_detail("broken", "<html><body><p>Maintenance</p></body></html>".to_string())
            .with_detail("fine", detail_page("g:fine:1.0", "V", "C", ""));

        let config = config("7.0").with_failure_policy(FailurePolicy::Skip);
        let result = Orchestrator::with_fetcher(config, market).run().await.unwrap();

        assert_eq!(result.report.app_components.len(), 1);
        assert_eq!(result.report.app_components[0].id, "fine");
        assert_eq!(result.stats.failed, 1);
        assert!(matches!(result.errors[0], AppError::Extract(_)));
    }

    #[tokio::test]
    async fn test_invalid_date_aborts_run() {
        let extra = r#"<div class="field-name-field-addon-updated"><span class="date-display-single">12.05.2019</span></div>"#;
        let market = FakeMarketplace::default()
            .with_listing(&[summary_block("dated", "Dated", "6.0")])
            .with_detail("dated", detail_page("g:dated:1.0", "V", "C", extra));

        let err = Orchestrator::with_fetcher(config("7.0"), market)
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Extract(ExtractError::InvalidDate { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_fetch_keeps_listing_order() {
        let ids = ["a", "b", "c", "d", "e"];
        let blocks: Vec<String> = ids
            .iter()
            .map(|id| summary_block(id, &id.to_uppercase(), "6.0"))
            .collect();

        let mut market = FakeMarketplace::default().with_listing(&blocks);
        for (i, id) in ids.iter().enumerate() {
            market = market
                .with_detail(id, detail_page(&format!("g:{}:1.0", id), "V", "C", ""))
                // Earlier listings finish later
                .with_delay(id, Duration::from_millis(10 * (ids.len() - i) as u64));
        }

        let config = config("7.0").with_concurrency(4);
        let result = Orchestrator::with_fetcher(config, market).run().await.unwrap();

        let got: Vec<&str> = result
            .report
            .app_components
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(got, ids);
    }
}

mod report_output {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_written_report_round_trips() {
        let market = FakeMarketplace::default()
            .with_listing(&[
                summary_block("one", "One", "6.0-6.5"),
                summary_block("two", "Two", "5.0"),
            ])
            .with_detail("one", detail_page("g:one:1.0", "Vendor One", "Tools", ""))
            .with_detail("two", detail_page("g:two:2.0", "Vendor Two", "Security", ""));

        let result = Orchestrator::with_fetcher(config("7.0"), market)
            .run()
            .await
            .unwrap();

        let dir = TempDir::new().unwrap();
        let path = write_report(&result.report, &dir.path().join("output.json")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let decoded: Report = serde_json::from_str(&content).unwrap();
        assert_eq!(decoded, result.report);
        assert_eq!(decoded.app_components.len(), 2);

        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["cubaVersion"], "7.0");
        assert_eq!(value["appComponents"][1]["vendor"], "Vendor Two");
        assert!(value["appComponents"][0]["updateDateTime"].is_null());
    }
}
