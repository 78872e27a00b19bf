//! HTTP client construction and page fetching
//!
//! One shared client carries the browser-simulating header set for every
//! request. Detail fetches absorb all transport failures locally: a task
//! that cannot fetch its page produces an all-`None` record and nothing
//! else, so no single fetch can disturb its siblings.

use crate::config::Config;
use crate::record::MovieRecord;
use crate::scrape::extract::extract_record;
use crate::{Result, ScrapeError};
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds the shared HTTP client from the configured headers and timeouts
pub fn build_http_client(config: &Config) -> Result<Client> {
    let user_agent =
        HeaderValue::from_str(&config.headers.user_agent).map_err(|_| {
            ScrapeError::InvalidHeader {
                name: "user-agent".to_string(),
            }
        })?;

    let mut default_headers = HeaderMap::new();
    default_headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.headers.accept_language).map_err(|_| {
            ScrapeError::InvalidHeader {
                name: "accept-language".to_string(),
            }
        })?,
    );

    let client = Client::builder()
        .user_agent(user_agent)
        .default_headers(default_headers)
        .timeout(Duration::from_secs(config.scraper.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Performs one GET and returns the response body
///
/// The status code is deliberately not inspected: an error page's body
/// extracts to nothing and the sink gate drops the record.
pub async fn fetch_page(client: &Client, url: &Url) -> std::result::Result<String, reqwest::Error> {
    let response = client.get(url.clone()).send().await?;
    response.text().await
}

/// Fetches one detail page and extracts its record
///
/// Pauses a random `[0, jitter_ms)` milliseconds first to spread request
/// bursts. Any transport failure degrades the result to an all-`None`
/// record; the error never propagates.
pub async fn fetch_detail(client: &Client, url: &Url, jitter_ms: u64) -> MovieRecord {
    pace(jitter_ms).await;

    match fetch_page(client, url).await {
        Ok(body) => extract_record(&body),
        Err(e) => {
            tracing::warn!("Fetch failed for {}: {}", url, e);
            MovieRecord::empty()
        }
    }
}

/// Sleeps a uniformly random delay below `jitter_ms` milliseconds
async fn pace(jitter_ms: u64) {
    if jitter_ms == 0 {
        return;
    }
    let delay = rand::rng().random_range(0..jitter_ms);
    tokio::time::sleep(Duration::from_millis(delay)).await;
}
