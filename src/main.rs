//! Cinemeter main entry point
//!
//! Command-line interface for the popular-movies detail scraper.

use anyhow::Context;
use cinemeter::config::{load_config, Config};
use cinemeter::run_scrape;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Cinemeter: a popular-movies detail scraper
///
/// Fetches the detail pages linked from a movie chart listing, extracts
/// title, release date, rating, and synopsis from each, and appends the
/// fully-complete records to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "cinemeter")]
#[command(version = "1.0.0")]
#[command(about = "A popular-movies detail scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, or fall back to the built-in defaults
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_scrape(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cinemeter=info,warn"),
            1 => EnvFilter::new("cinemeter=debug,info"),
            2 => EnvFilter::new("cinemeter=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be scraped
fn handle_dry_run(config: &Config) {
    println!("=== Cinemeter Dry Run ===\n");

    println!("Scraper Configuration:");
    println!(
        "  Max concurrent fetches: {}",
        config.scraper.max_concurrent_fetches
    );
    println!("  Pacing jitter: {}ms", config.scraper.jitter_ms);
    println!(
        "  Request timeout: {}s",
        config.scraper.request_timeout_secs
    );

    println!("\nHeaders:");
    println!("  User-Agent: {}", config.headers.user_agent);
    println!("  Accept-Language: {}", config.headers.accept_language);

    println!("\nSeed:");
    println!("  Chart URL: {}", config.seed.chart_url);
    println!("  Link origin: {}", config.seed.origin);

    println!("\nOutput:");
    println!("  CSV file: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main scrape operation and reports elapsed wall-clock time
async fn handle_scrape(config: Config) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let stats = run_scrape(config).await.context("scrape failed")?;

    println!(
        "Committed {} records ({} discarded)",
        stats.committed, stats.discarded
    );
    println!(
        "Total time taken: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
