//! Brewery page and brewery beer-listing mappers.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::dom::{collapsed_text, static_selector};
use super::search::parse_listing_count;

/// Compiles a regex at static init; panics on invalid pattern.
fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

static HEADING: LazyLock<Selector> = LazyLock::new(|| static_selector("h1"));
// The brewery type is plain text before a line break; the serialized
// markup is the only place it is addressable.
static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"Type:\s*([^<]*?)\s*<br"));
static STREET: LazyLock<Selector> =
    LazyLock::new(|| static_selector("span[itemprop=\"streetAddress\"]"));
static CITY: LazyLock<Selector> =
    LazyLock::new(|| static_selector("span[itemprop=\"addressLocality\"]"));
static STATE: LazyLock<Selector> =
    LazyLock::new(|| static_selector("span[itemprop=\"addressRegion\"]"));
static COUNTRY: LazyLock<Selector> =
    LazyLock::new(|| static_selector("span[itemprop=\"addressCountry\"]"));
static POSTAL: LazyLock<Selector> =
    LazyLock::new(|| static_selector("span[itemprop=\"postalCode\"]"));
static TELEPHONE: LazyLock<Selector> =
    LazyLock::new(|| static_selector("span[itemprop=\"telephone\"]"));
static WEBSITE: LazyLock<Selector> = LazyLock::new(|| static_selector("a[itemprop=\"url\"]"));

// Beer listing table on `{brewery_url}0/{page}/` pages.
static LISTING_ROWS: LazyLock<Selector> =
    LazyLock::new(|| static_selector("table.maintable.nohover tr"));
static CELLS: LazyLock<Selector> = LazyLock::new(|| static_selector("td"));
static BEER_LINK: LazyLock<Selector> = LazyLock::new(|| static_selector("a[href^=\"/beer/\"]"));

/// Typed fields from a brewery page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreweryPageData {
    /// Brewery name from the page heading.
    pub name: String,
    /// Classification string ("Microbrewery", "Brew Pub", ...).
    pub brewery_type: Option<String>,
    /// Street address.
    pub street: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Telephone number.
    pub telephone: Option<String>,
    /// Brewery website URL.
    pub website: Option<String>,
}

/// One row of a beer listing table (brewery page or style listing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeerRow {
    /// Site-relative beer path.
    pub url: String,
    /// Beer name shown in the listing.
    pub name: String,
    /// Overall rating out of 100 when the listing shows one.
    pub overall_rating: Option<u32>,
    /// Rating count when the listing shows one.
    pub num_ratings: Option<u32>,
}

/// Maps a usable brewery page (already past the classifier) to its fields.
#[must_use]
pub fn extract_brewery_page(doc: &Html) -> BreweryPageData {
    BreweryPageData {
        name: doc
            .select(&HEADING)
            .next()
            .map(collapsed_text)
            .unwrap_or_default(),
        brewery_type: TYPE_RE
            .captures(&doc.root_element().html())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty()),
        street: span_text(doc, &STREET),
        city: span_text(doc, &CITY),
        state: span_text(doc, &STATE),
        country: span_text(doc, &COUNTRY),
        postal_code: span_text(doc, &POSTAL),
        telephone: span_text(doc, &TELEPHONE),
        website: doc
            .select(&WEBSITE)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string),
    }
}

fn span_text(doc: &Html, selector: &Selector) -> Option<String> {
    let text = collapsed_text(doc.select(selector).next()?);
    (!text.is_empty()).then_some(text)
}

/// Extracts one page of a brewery's beer listing.
///
/// Returns the raw row count (header included — the walker's termination
/// threshold is judged against it) alongside the usable rows. Decorative
/// rows and rows without a beer link are filtered, never yielded.
#[must_use]
pub fn extract_beer_listing(doc: &Html) -> (usize, Vec<BeerRow>) {
    let rows: Vec<ElementRef<'_>> = doc.select(&LISTING_ROWS).collect();
    let raw_count = rows.len();
    // First row is the header.
    let beers = rows
        .into_iter()
        .skip(1)
        .filter_map(extract_beer_row)
        .collect();
    (raw_count, beers)
}

fn extract_beer_row(row: ElementRef<'_>) -> Option<BeerRow> {
    // Placeholder beers that cannot be rated carry no beer link; skip them.
    let anchor = row.select(&BEER_LINK).next()?;
    let url = anchor.value().attr("href")?.trim().to_string();
    let name = collapsed_text(anchor);
    if name.is_empty() {
        return None;
    }
    let cells: Vec<ElementRef<'_>> = row.select(&CELLS).collect();
    Some(BeerRow {
        url,
        name,
        overall_rating: cells.get(3).and_then(|c| parse_listing_count(&collapsed_text(*c))),
        num_ratings: cells.get(4).and_then(|c| parse_listing_count(&collapsed_text(*c))),
    })
}
