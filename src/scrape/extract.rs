//! Field extraction from a movie detail page
//!
//! The markup is third-party and uncontrolled, so every lookup is tolerant:
//! a missing node yields `None` for that field, never an error. Completeness
//! is enforced downstream by the sink gate, not here.

use crate::record::MovieRecord;
use scraper::{ElementRef, Html, Selector};

/// The top-level content section of a detail page
const DETAIL_SECTION: &str = "section.ipc-page-section";

/// Substring marking a link to the release-info page
const RELEASE_INFO_MARKER: &str = "releaseinfo";

/// Marker attribute of the aggregate rating score element
const RATING_SELECTOR: &str = r#"div[data-testid="hero-rating-bar__aggregate-rating__score"]"#;

/// Marker attribute of the short synopsis element
const SYNOPSIS_SELECTOR: &str = r#"span[data-testid="plot-xs_to_m"]"#;

/// Extracts the movie fields from one detail page's markup
///
/// Pure function of its input: identical markup yields an identical record.
/// When the page's content section or its expected second block is missing,
/// the whole record is `None` — the gate will drop it.
pub fn extract_record(html: &str) -> MovieRecord {
    let document = Html::parse_document(html);

    let Some(block) = detail_block(&document) else {
        return MovieRecord::empty();
    };

    MovieRecord {
        title: extract_title(&block),
        release_date: extract_release_date(&block),
        rating: extract_rating(&document),
        synopsis: extract_synopsis(&document),
    }
}

/// Locates the block holding title and release info: the second immediate
/// `div` child of the first content section
fn detail_block(document: &Html) -> Option<ElementRef<'_>> {
    let section_selector = Selector::parse(DETAIL_SECTION).ok()?;
    let section = document.select(&section_selector).next()?;

    section
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "div")
        .nth(1)
}

/// The title is the text of the first span inside the block's first heading
fn extract_title(block: &ElementRef<'_>) -> Option<String> {
    let heading_selector = Selector::parse("h1").ok()?;
    let span_selector = Selector::parse("span").ok()?;

    let heading = block.select(&heading_selector).next()?;
    let span = heading.select(&span_selector).next()?;
    Some(span.text().collect::<String>())
}

/// The release date is the trimmed text of the first link in the block whose
/// target contains the release-info marker
fn extract_release_date(block: &ElementRef<'_>) -> Option<String> {
    let anchor_selector = Selector::parse("a[href]").ok()?;

    block
        .select(&anchor_selector)
        .find(|anchor| {
            anchor
                .value()
                .attr("href")
                .is_some_and(|href| href.contains(RELEASE_INFO_MARKER))
        })
        .map(|anchor| anchor.text().collect::<String>().trim().to_string())
}

/// The rating is the text of the rating-score marker element, searched across
/// the whole page rather than the detail block
fn extract_rating(document: &Html) -> Option<String> {
    let rating_selector = Selector::parse(RATING_SELECTOR).ok()?;

    document
        .select(&rating_selector)
        .next()
        .map(|element| element.text().collect::<String>())
}

/// The synopsis is the trimmed text of the short-synopsis marker element,
/// searched across the whole page
fn extract_synopsis(document: &Html) -> Option<String> {
    let synopsis_selector = Selector::parse(SYNOPSIS_SELECTOR).ok()?;

    document
        .select(&synopsis_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}
