//! End-to-end pipeline tests
//!
//! These tests run the full scrape against wiremock servers and inspect the
//! CSV file the sink produced.

use cinemeter::config::Config;
use cinemeter::{run_scrape, ScrapeError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a config pointing the pipeline at a mock server
fn test_config(server_uri: &str, csv_path: &str) -> Config {
    let mut config = Config::default();
    config.scraper.max_concurrent_fetches = 5;
    config.scraper.jitter_ms = 1;
    config.scraper.request_timeout_secs = 5;
    config.seed.chart_url = format!("{}/chart/", server_uri);
    config.seed.origin = server_uri.to_string();
    config.output.csv_path = csv_path.to_string();
    config
}

/// Chart page listing the given detail paths
fn chart_body(paths: &[&str]) -> String {
    let items: String = paths
        .iter()
        .map(|p| format!(r#"<li><a href="{}">movie</a></li>"#, p))
        .collect();
    format!(
        r#"<html><body>
        <div data-testid="chart-layout-main-column"><ul>{}</ul></div>
        </body></html>"#,
        items
    )
}

/// Detail page markup; `with_rating` toggles the rating marker element
fn detail_body(title: &str, with_rating: bool) -> String {
    let rating = if with_rating {
        r#"<div data-testid="hero-rating-bar__aggregate-rating__score">8.1/10</div>"#
    } else {
        ""
    };
    format!(
        r#"<html><body>
        <section class="ipc-page-section">
            <div>banner</div>
            <div>
                <h1><span>{title}</span></h1>
                <a href="/title/x/releaseinfo/">May 5, 2024</a>
            </div>
        </section>
        {rating}
        <span data-testid="plot-xs_to_m">A synopsis.</span>
        </body></html>"#
    )
}

/// Reads the produced CSV back as a list of rows
fn read_rows(csv_path: &std::path::Path) -> Vec<csv::StringRecord> {
    if !csv_path.exists() {
        return Vec::new();
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(csv_path)
        .unwrap();
    reader.records().map(|r| r.unwrap()).collect()
}

#[tokio::test]
async fn test_full_pipeline_commits_complete_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/chart/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(chart_body(&["/title/tt1/", "/title/tt2/", "/title/tt3/"])),
        )
        .mount(&server)
        .await;

    for (p, title) in [
        ("/title/tt1/", "First Movie"),
        ("/title/tt2/", "Second Movie"),
        ("/title/tt3/", "Third Movie"),
    ] {
        Mock::given(method("GET"))
            .and(path(p))
            .respond_with(ResponseTemplate::new(200).set_body_string(detail_body(title, true)))
            .mount(&server)
            .await;
    }

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("movies.csv");
    let config = test_config(&server.uri(), csv_path.to_str().unwrap());

    let stats = run_scrape(config).await.unwrap();
    assert_eq!(stats.committed, 3);
    assert_eq!(stats.discarded, 0);

    let rows = read_rows(&csv_path);
    assert_eq!(rows.len(), 3);

    // Completion order is unspecified; compare as a set
    let mut titles: Vec<String> = rows.iter().map(|r| r[0].to_string()).collect();
    titles.sort();
    assert_eq!(titles, ["First Movie", "Second Movie", "Third Movie"]);
    for row in &rows {
        assert_eq!(&row[1], "May 5, 2024");
        assert_eq!(&row[2], "8.1/10");
        assert_eq!(&row[3], "A synopsis.");
    }
}

#[tokio::test]
async fn test_incomplete_record_discarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/chart/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(chart_body(&["/title/tt1/", "/title/tt2/"])),
        )
        .mount(&server)
        .await;

    // tt1 is complete, tt2 lacks the rating marker
    Mock::given(method("GET"))
        .and(path("/title/tt1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_body("Kept", true)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/title/tt2/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_body("Dropped", false)))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("movies.csv");
    let config = test_config(&server.uri(), csv_path.to_str().unwrap());

    let stats = run_scrape(config).await.unwrap();
    assert_eq!(stats.committed, 1);
    assert_eq!(stats.discarded, 1);

    let rows = read_rows(&csv_path);
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "Kept");
}

#[tokio::test]
async fn test_detail_failure_isolated_from_siblings() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/chart/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(chart_body(&["/title/tt1/", "/title/tt2/"])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/title/tt1/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/title/tt2/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_body("Survivor", true)))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("movies.csv");
    let config = test_config(&server.uri(), csv_path.to_str().unwrap());

    let stats = run_scrape(config).await.unwrap();
    assert_eq!(stats.committed, 1);
    assert_eq!(stats.discarded, 1);

    let rows = read_rows(&csv_path);
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "Survivor");
}

#[tokio::test]
async fn test_missing_chart_container_aborts_run() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/chart/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>nothing here</p></body></html>"),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("movies.csv");
    let config = test_config(&server.uri(), csv_path.to_str().unwrap());

    let result = run_scrape(config).await;
    assert!(matches!(result, Err(ScrapeError::ChartMissing { .. })));

    // Nothing was dispatched, nothing was written
    assert!(read_rows(&csv_path).is_empty());
}

#[tokio::test]
async fn test_unreachable_seed_aborts_run() {
    let mut config = Config::default();
    // Nothing listens on this port
    config.seed.chart_url = "http://127.0.0.1:1/chart/".to_string();
    config.seed.origin = "http://127.0.0.1:1".to_string();
    config.scraper.request_timeout_secs = 2;

    let dir = tempfile::tempdir().unwrap();
    config.output.csv_path = dir
        .path()
        .join("movies.csv")
        .to_str()
        .unwrap()
        .to_string();

    let result = run_scrape(config).await;
    assert!(matches!(result, Err(ScrapeError::Http { .. })));
}

#[tokio::test]
async fn test_empty_chart_list_is_a_noop_run() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/chart/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(chart_body(&[])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("movies.csv");
    let config = test_config(&server.uri(), csv_path.to_str().unwrap());

    let stats = run_scrape(config).await.unwrap();
    assert_eq!(stats.committed, 0);
    assert_eq!(stats.discarded, 0);
    assert!(read_rows(&csv_path).is_empty());
}
