//! Detail-page link collection from the seed chart listing
//!
//! Unlike field extraction, a missing chart container or list is fatal:
//! without the listing there is nothing to dispatch.

use crate::{Result, ScrapeError};
use scraper::{Html, Selector};
use url::Url;

/// Marker attribute of the chart's main column container
const CHART_CONTAINER: &str = r#"div[data-testid="chart-layout-main-column"]"#;

/// Collects the detail-page addresses from the chart listing markup
///
/// Walks the chart container's list and resolves each item's first link
/// against `origin`, preserving document order. Items without a usable link
/// are skipped; only the container or list being absent aborts the run.
pub fn collect_chart_links(html: &str, origin: &Url) -> Result<Vec<Url>> {
    let document = Html::parse_document(html);

    let container = Selector::parse(CHART_CONTAINER)
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .ok_or(ScrapeError::ChartMissing {
            element: "chart container",
        })?;

    let list = Selector::parse("ul")
        .ok()
        .and_then(|selector| container.select(&selector).next())
        .ok_or(ScrapeError::ChartMissing {
            element: "chart list",
        })?;

    let item_selector = Selector::parse("li").map_err(|_| ScrapeError::ChartMissing {
        element: "chart items",
    })?;
    let anchor_selector = Selector::parse("a[href]").map_err(|_| ScrapeError::ChartMissing {
        element: "chart items",
    })?;

    let mut links = Vec::new();
    for item in list.select(&item_selector) {
        let Some(anchor) = item.select(&anchor_selector).next() else {
            tracing::debug!("Chart item without a link, skipping");
            continue;
        };
        // a[href] guarantees the attribute exists
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        match origin.join(href) {
            Ok(url) => links.push(url),
            Err(e) => {
                tracing::debug!("Unresolvable chart href {}: {}", href, e);
            }
        }
    }

    Ok(links)
}
