use serde::Deserialize;

/// Main configuration structure for cinemeter
///
/// Every section and field carries a default, so a partial file (or no file
/// at all) yields a runnable configuration matching the stock scrape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub headers: HeaderConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Maximum number of detail fetches in flight at once
    #[serde(rename = "max-concurrent-fetches", default = "default_max_concurrent")]
    pub max_concurrent_fetches: u32,

    /// Upper bound of the random pre-fetch pause (milliseconds); 0 disables it
    #[serde(rename = "jitter-ms", default = "default_jitter_ms")]
    pub jitter_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Request header configuration
///
/// The defaults simulate a common desktop browser so the chart host does not
/// trivially filter the requests.
#[derive(Debug, Clone, Deserialize)]
pub struct HeaderConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,
}

/// Seed listing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// The chart listing page that seeds the run
    #[serde(rename = "chart-url", default = "default_chart_url")]
    pub chart_url: String,

    /// Origin that relative detail links are resolved against
    #[serde(default = "default_origin")]
    pub origin: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the append-only CSV file
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,
}

fn default_max_concurrent() -> u32 {
    100
}

fn default_jitter_ms() -> u64 {
    200
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/42.0.2311.135 Safari/537.36 Edge/12.246"
        .to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.9".to_string()
}

fn default_chart_url() -> String {
    "https://www.imdb.com/chart/moviemeter/?ref_=nv_mv_mpm".to_string()
}

fn default_origin() -> String {
    "https://imdb.com".to_string()
}

fn default_csv_path() -> String {
    "movies.csv".to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_max_concurrent(),
            jitter_ms: default_jitter_ms(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            chart_url: default_chart_url(),
            origin: default_origin(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}
