//! marketscrape - Marketplace add-on compatibility scraper
//!
//! Fetches the marketplace listing page, keeps the add-ons whose supported
//! versions do not include the target platform version, reads each one's
//! detail page and writes the result as a JSON report.

use clap::Parser;
use marketscrape::cli::CliArgs;
use marketscrape::config::ScrapeConfig;
use marketscrape::orchestrator::Orchestrator;
use marketscrape::output::{write_report, TextSummary};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    init_logging(&args);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<()> {
    let config = ScrapeConfig::resolve(&args)?;
    info!(
        "marketscrape v{} checking against {}",
        env!("CARGO_PKG_VERSION"),
        config.target_version
    );

    let orchestrator = Orchestrator::new(config)?;
    let result = orchestrator.run_with_progress(args.show_progress()).await?;

    let path = write_report(&result.report, &orchestrator.config().output_path)?;

    let mut stdout = io::stdout().lock();
    TextSummary::new(args.verbose).format(&result, &path, &mut stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Initialize logging on stderr based on verbosity flags
fn init_logging(args: &CliArgs) {
    let mut filter = EnvFilter::from_default_env();
    let rust_log_set = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    if let Some(Ok(directive)) = args
        .log_directive(rust_log_set)
        .map(|d| d.parse::<Directive>())
    {
        filter = filter.add_directive(directive);
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
