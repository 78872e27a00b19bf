//! Scrape module: the concurrent fetch-and-extract pipeline
//!
//! This module contains the core pipeline logic:
//! - Detail-link collection from the seed chart page
//! - Tolerant field extraction from detail-page markup
//! - HTTP fetching with pacing jitter
//! - Bounded task dispatch with per-task failure isolation

mod collect;
mod extract;
mod fetcher;
mod pool;

pub use collect::collect_chart_links;
pub use extract::extract_record;
pub use fetcher::{build_http_client, fetch_detail, fetch_page};
pub use pool::{dispatch, DispatchStats, TaskOutcome};

use crate::config::Config;
use crate::output::{CsvSink, RecordSink};
use crate::{Result, ScrapeError};
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Runs the whole pipeline: seed fetch, link collection, bounded dispatch
///
/// Fatal errors are limited to configuration problems, the seed page being
/// unreachable, and the chart structure being absent. Everything that goes
/// wrong on an individual detail page shows up only as a missing row in the
/// output.
///
/// # Arguments
///
/// * `config` - The scraper configuration
///
/// # Returns
///
/// * `Ok(DispatchStats)` - Every task reached a terminal state
/// * `Err(ScrapeError)` - The run aborted before dispatch
pub async fn run_scrape(config: Config) -> Result<DispatchStats> {
    let client = build_http_client(&config)?;

    let seed = Url::parse(&config.seed.chart_url)?;
    let origin = Url::parse(&config.seed.origin)?;

    // Seed fetch failure is fatal: without the listing there is no work
    tracing::info!("Fetching chart listing from {}", seed);
    let seed_body = fetch_page(&client, &seed)
        .await
        .map_err(|source| ScrapeError::Http {
            url: seed.to_string(),
            source,
        })?;

    let links = collect_chart_links(&seed_body, &origin)?;
    tracing::info!("Discovered {} detail pages", links.len());

    let sink: Arc<dyn RecordSink> = Arc::new(CsvSink::open(Path::new(&config.output.csv_path))?);
    let jitter_ms = config.scraper.jitter_ms;
    let bound = config.scraper.max_concurrent_fetches as usize;

    let stats = dispatch(links, bound, move |url| {
        let client = client.clone();
        let sink = Arc::clone(&sink);

        async move {
            let record = fetch_detail(&client, &url, jitter_ms).await;

            match sink.commit(&record) {
                Ok(true) => {
                    tracing::info!(
                        "Committed: {} | {} | {} | {}",
                        record.title.as_deref().unwrap_or(""),
                        record.release_date.as_deref().unwrap_or(""),
                        record.rating.as_deref().unwrap_or(""),
                        record.synopsis.as_deref().unwrap_or("")
                    );
                    TaskOutcome::Committed
                }
                Ok(false) => {
                    tracing::debug!("Incomplete record for {}, discarded", url);
                    TaskOutcome::Discarded
                }
                Err(e) => {
                    tracing::error!("Failed to write record for {}: {}", url, e);
                    TaskOutcome::Discarded
                }
            }
        }
    })
    .await;

    tracing::info!(
        "Scrape finished: {} committed, {} discarded",
        stats.committed,
        stats.discarded
    );

    Ok(stats)
}
