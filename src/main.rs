//! Uni-Notice main entry point
//!
//! This is the command-line interface for the Uni-Notice board crawler.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uni_notice::config::{read_config_with_hash, validate, Config};
use uni_notice::crawler::Coordinator;
use uni_notice::output::{print_statistics, JsonLinesWriter};
use uni_notice::DateRange;

/// Uni-Notice: a university announcement board crawler
///
/// Walks the configured notice board listing, keeps notices inside the
/// requested posting-date range and writes each one, with its plain-text
/// body, as a JSON line.
#[derive(Parser, Debug)]
#[command(name = "uni-notice")]
#[command(version)]
#[command(about = "Crawls a university notice board into JSON Lines", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Only keep notices posted on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    date_from: Option<String>,

    /// Only keep notices posted on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    date_to: Option<String>,

    /// Keep notices without a recognizable date (yes/no)
    #[arg(long, value_name = "FLAG")]
    include_undated: Option<String>,

    /// Override the JSON Lines output path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Override the number of listing pages to walk
    #[arg(long)]
    pages: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = read_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    apply_overrides(&mut config, &cli);
    validate(&config).context("invalid configuration after command-line overrides")?;

    let range = resolve_date_range(&config);

    if cli.dry_run {
        handle_dry_run(&config, &range)?;
    } else {
        handle_crawl(&config, range).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("uni_notice=info,warn"),
            1 => EnvFilter::new("uni_notice=debug,info"),
            2 => EnvFilter::new("uni_notice=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Command-line values take precedence over the config file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(date_from) = &cli.date_from {
        config.filter.date_from = Some(date_from.clone());
    }
    if let Some(date_to) = &cli.date_to {
        config.filter.date_to = Some(date_to.clone());
    }
    if let Some(flag) = &cli.include_undated {
        config.filter.include_undated = Some(flag.clone());
    }
    if let Some(output) = &cli.output {
        config.output.jsonl_path = output.display().to_string();
    }
    if let Some(pages) = cli.pages {
        config.crawler.pages = pages;
    }
}

/// Builds the run's date range, reporting every problem with the bounds
fn resolve_date_range(config: &Config) -> DateRange {
    let (range, warnings) = config.filter.date_range();
    for warning in &warnings {
        tracing::warn!("Configuration warning: {}", warning);
    }
    tracing::info!(
        "Date range: from={:?} to={:?} include_undated={}",
        range.from,
        range.to,
        range.include_undated
    );
    range
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config, range: &DateRange) -> anyhow::Result<()> {
    let coordinator = Coordinator::from_config(config, *range)?;

    println!("=== Uni-Notice Dry Run ===\n");

    println!("Listing pages ({}):", coordinator.listing_urls().len());
    for url in coordinator.listing_urls() {
        println!("  - {}", url);
    }

    println!("\nCrawler:");
    println!(
        "  Max concurrent detail fetches: {}",
        config.crawler.max_concurrent_details
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  User agent: {}", config.user_agent.user_agent_string());

    println!("\nFilter:");
    println!("  From: {}", display_bound(range.from));
    println!("  To: {}", display_bound(range.to));
    println!("  Include undated: {}", range.include_undated);

    println!("\nOutput: {}", config.output.jsonl_path);
    println!("\n✓ Configuration is valid");

    Ok(())
}

fn display_bound(bound: Option<chrono::NaiveDate>) -> String {
    bound.map_or_else(|| "(open)".to_string(), |date| date.to_string())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, range: DateRange) -> anyhow::Result<()> {
    let output_path = Path::new(&config.output.jsonl_path);
    let mut sink = JsonLinesWriter::create(output_path)
        .with_context(|| format!("failed to create {}", output_path.display()))?;

    let coordinator = Coordinator::from_config(config, range)?;
    tracing::info!(
        "Starting crawl of {} listing page(s)",
        coordinator.listing_urls().len()
    );

    match coordinator.run(&mut sink).await {
        Ok(stats) => {
            tracing::info!("Notices written to {}", output_path.display());
            print_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
