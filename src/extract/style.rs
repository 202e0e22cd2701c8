//! Beer-styles page and style-listing mappers, plus the brewers index.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::brewery::BeerRow;
use super::dom::{collapsed_text, static_selector};
use super::search::{parse_listing_count, path_id};

static TABLES: LazyLock<Selector> = LazyLock::new(|| static_selector("table"));
static STYLE_ITEMS: LazyLock<Selector> = LazyLock::new(|| static_selector("td li"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| static_selector("a[href]"));
static ROWS: LazyLock<Selector> = LazyLock::new(|| static_selector("tr"));
static CELLS: LazyLock<Selector> = LazyLock::new(|| static_selector("td"));
static BEER_LINK: LazyLock<Selector> = LazyLock::new(|| static_selector("a[href^=\"/beer/\"]"));
static BREWER_LINK: LazyLock<Selector> =
    LazyLock::new(|| static_selector("a[href^=\"/brewers/\"]"));

/// Which of the page's tables holds the style columns.
const STYLE_TABLE_INDEX: usize = 2;

/// A style name with its listing path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeerStyle {
    /// Style display name.
    pub name: String,
    /// Site-relative path of the style's listing page.
    pub url: String,
}

/// Extracts the style directory from the beer-styles page.
#[must_use]
pub fn extract_style_list(doc: &Html) -> Vec<BeerStyle> {
    let Some(table) = doc.select(&TABLES).nth(STYLE_TABLE_INDEX) else {
        return Vec::new();
    };
    table
        .select(&STYLE_ITEMS)
        .filter_map(|item| {
            let anchor = item.select(&ANCHOR).next()?;
            let url = anchor.value().attr("href")?.trim().to_string();
            let name = collapsed_text(item);
            (!name.is_empty()).then_some(BeerStyle { name, url })
        })
        .collect()
}

/// Extracts one page of a style's beer listing.
///
/// Returns the raw row count (header included) alongside the usable rows;
/// the beer link sits in the second cell of each data row.
#[must_use]
pub fn extract_style_listing(doc: &Html) -> (usize, Vec<BeerRow>) {
    let Some(table) = doc.select(&TABLES).next() else {
        return (0, Vec::new());
    };
    let rows: Vec<ElementRef<'_>> = table.select(&ROWS).collect();
    let raw_count = rows.len();
    let beers = rows
        .into_iter()
        .skip(1)
        .filter_map(|row| {
            let cells: Vec<ElementRef<'_>> = row.select(&CELLS).collect();
            let anchor = cells.get(1)?.select(&BEER_LINK).next()?;
            let url = anchor.value().attr("href")?.trim().to_string();
            let name = collapsed_text(anchor);
            (!name.is_empty()).then(|| BeerRow {
                url,
                name,
                overall_rating: cells
                    .get(3)
                    .and_then(|c| parse_listing_count(&collapsed_text(*c))),
                num_ratings: cells
                    .get(4)
                    .and_then(|c| parse_listing_count(&collapsed_text(*c))),
            })
        })
        .collect();
    (raw_count, beers)
}

/// A brewery entry from the alphabetical brewers index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrewerEntry {
    /// Site-relative brewery path.
    pub url: String,
    /// Numeric id from the path.
    pub id: Option<u64>,
    /// Brewery display name.
    pub name: String,
}

/// Extracts the brewery links from a `/browsebrewers-X.htm` index page.
#[must_use]
pub fn extract_brewer_index(doc: &Html) -> Vec<BrewerEntry> {
    doc.select(&BREWER_LINK)
        .filter_map(|anchor| {
            let url = anchor.value().attr("href")?.trim().to_string();
            let name = collapsed_text(anchor);
            (!name.is_empty()).then(|| BrewerEntry {
                id: path_id(&url),
                name,
                url,
            })
        })
        .collect()
}
