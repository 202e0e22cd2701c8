//! Search results page mapper.
//!
//! The results page interleaves `h1` section headers with `table.results`
//! blocks; which table belongs to which section is positional (the n-th
//! header owns the (n-1)-th table, the page title being header zero).

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::dom::{collapsed_text, static_selector};

fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

static RESULT_TABLES: LazyLock<Selector> = LazyLock::new(|| static_selector("table.results"));
static SECTION_HEADERS: LazyLock<Selector> = LazyLock::new(|| static_selector("h1"));
static ROWS: LazyLock<Selector> = LazyLock::new(|| static_selector("tr"));
static CELLS: LazyLock<Selector> = LazyLock::new(|| static_selector("td"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| static_selector("a[href]"));
static BEER_NAME_CELL: LazyLock<Selector> = LazyLock::new(|| static_selector("td.results a[href]"));
static RIGHT_CELL: LazyLock<Selector> = LazyLock::new(|| static_selector("td[align=\"right\"]"));

/// Numeric entity id embedded in a site path ("/beer/x/55610/" -> 55610).
static PATH_ID_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"/(\d+)/"));

/// Sentinel text node shown when the beer section matched nothing.
const NO_BEERS_SENTINEL: &str = "0 beers";

/// A beer hit with the listing's inline fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeerHit {
    /// Site-relative beer path, trimmed.
    pub url: String,
    /// Numeric id from the path.
    pub id: Option<u64>,
    /// Beer name.
    pub name: String,
    /// Overall rating when the listing shows one.
    pub overall_rating: Option<u32>,
    /// Rating count when the listing shows one.
    pub num_ratings: Option<u32>,
}

/// A brewery hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreweryHit {
    /// Site-relative brewery path.
    pub url: String,
    /// Numeric id from the path.
    pub id: Option<u64>,
    /// Brewery name.
    pub name: String,
    /// Location column text.
    pub location: Option<String>,
}

/// Extracted search results page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPageData {
    /// Beer section hits, page order.
    pub beers: Vec<BeerHit>,
    /// Brewery section hits, page order.
    pub breweries: Vec<BreweryHit>,
}

/// Maps a search results page.
#[must_use]
pub fn extract_search_page(doc: &Html) -> SearchPageData {
    let tables: Vec<ElementRef<'_>> = doc.select(&RESULT_TABLES).collect();
    let mut data = SearchPageData::default();

    for (index, header) in doc.select(&SECTION_HEADERS).enumerate() {
        let text = collapsed_text(header).to_lowercase();
        let Some(table) = index.checked_sub(1).and_then(|i| tables.get(i)) else {
            continue;
        };
        if text.contains("brewers") {
            data.breweries = extract_brewery_hits(*table);
        } else if text.contains("beers") && !has_no_beers_sentinel(doc) {
            data.beers = extract_beer_hits(*table);
        }
    }

    data
}

fn has_no_beers_sentinel(doc: &Html) -> bool {
    doc.root_element()
        .text()
        .any(|t| t.trim() == NO_BEERS_SENTINEL)
}

fn extract_brewery_hits(table: ElementRef<'_>) -> Vec<BreweryHit> {
    table
        .select(&ROWS)
        .filter_map(|row| {
            let anchor = row.select(&ANCHOR).next()?;
            let url = anchor.value().attr("href")?.trim().to_string();
            Some(BreweryHit {
                id: path_id(&url),
                name: collapsed_text(anchor),
                location: row
                    .select(&RIGHT_CELL)
                    .next()
                    .map(collapsed_text)
                    .filter(|t| !t.is_empty()),
                url,
            })
        })
        .collect()
}

fn extract_beer_hits(table: ElementRef<'_>) -> Vec<BeerHit> {
    table
        .select(&ROWS)
        // First row is the column header.
        .skip(1)
        .filter_map(|row| {
            let anchor = row.select(&BEER_NAME_CELL).next()?;
            let url = anchor.value().attr("href")?.trim().to_string();
            let cells: Vec<ElementRef<'_>> = row.select(&CELLS).collect();
            Some(BeerHit {
                id: path_id(&url),
                name: collapsed_text(anchor),
                overall_rating: cells
                    .get(3)
                    .and_then(|c| parse_listing_count(&collapsed_text(*c))),
                num_ratings: cells
                    .get(4)
                    .and_then(|c| parse_listing_count(&collapsed_text(*c))),
                url,
            })
        })
        .collect()
}

/// Numeric id segment from a site path.
#[must_use]
pub fn path_id(url: &str) -> Option<u64> {
    PATH_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parses a listing cell that is either a count/score or blank.
#[must_use]
pub fn parse_listing_count(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn results_page(brewery_rows: &str, beer_section: &str) -> Html {
        Html::parse_document(&format!(
            "<html><body>\
             <h1>ratebeer search</h1>\
             <h1>brewers</h1>\
             <table class=\"results\">{brewery_rows}</table>\
             <h1>beers</h1>\
             {beer_section}\
             </body></html>"
        ))
    }

    fn beer_table() -> &'static str {
        "<table class=\"results\">\
         <tr><th>Name</th><th>Brewery</th><th>Style</th><th>Score</th><th>Ratings</th></tr>\
         <tr><td class=\"results\"><a href=\"/beer/deschutes-inversion-ipa/55610/\">Deschutes Inversion IPA</a></td>\
         <td>Deschutes</td><td>IPA</td><td>93</td><td>1157</td></tr>\
         <tr><td class=\"results\"><a href=\" /beer/13-virtues-cleanliness-helles/231944/ \">13 Virtues Cleanliness Helles</a></td>\
         <td>13 Virtues</td><td>Helles</td><td></td><td></td></tr>\
         </table>"
    }

    #[test]
    fn test_extracts_beer_hits_with_inline_fields() {
        let doc = results_page("", beer_table());
        let data = extract_search_page(&doc);
        assert!(data.breweries.is_empty());
        assert_eq!(data.beers.len(), 2);
        let first = &data.beers[0];
        assert_eq!(first.url, "/beer/deschutes-inversion-ipa/55610/");
        assert_eq!(first.id, Some(55610));
        assert_eq!(first.name, "Deschutes Inversion IPA");
        assert_eq!(first.overall_rating, Some(93));
        assert_eq!(first.num_ratings, Some(1157));
    }

    #[test]
    fn test_whitespace_in_href_is_trimmed() {
        let doc = results_page("", beer_table());
        let data = extract_search_page(&doc);
        assert_eq!(data.beers[1].url, "/beer/13-virtues-cleanliness-helles/231944/");
        assert!(data.beers[1].overall_rating.is_none(), "blank score cell is absent");
    }

    #[test]
    fn test_brewery_hits_with_location_column() {
        let doc = results_page(
            "<tr><td><a href=\"/brewers/deschutes-brewery/233/\">Deschutes Brewery</a></td>\
             <td align=\"right\">Bend, Oregon</td></tr>",
            "<table class=\"results\"></table>",
        );
        let data = extract_search_page(&doc);
        assert_eq!(data.breweries.len(), 1);
        assert_eq!(data.breweries[0].id, Some(233));
        assert_eq!(data.breweries[0].location.as_deref(), Some("Bend, Oregon"));
    }

    #[test]
    fn test_zero_beers_sentinel_empties_beer_section() {
        let doc = Html::parse_document(
            "<html><body><h1>ratebeer search</h1><h1>beers</h1>\
             <span>0 beers</span><table class=\"results\"><tr><td class=\"results\">\
             <a href=\"/beer/ghost/1/\">Ghost</a></td></tr></table></body></html>",
        );
        let data = extract_search_page(&doc);
        assert!(data.beers.is_empty(), "sentinel must suppress the beer section");
    }

    #[test]
    fn test_path_id_takes_trailing_numeric_segment() {
        assert_eq!(path_id("/beer/deschutes-inversion-ipa/55610/"), Some(55610));
        assert_eq!(path_id("/beer/no-id/"), None);
    }
}
