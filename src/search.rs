//! Free-text search against the site's legacy form endpoint.
//!
//! The endpoint predates the rest of the web: it expects the query as
//! ISO-8859-1 form bytes, not UTF-8. Characters that cannot be represented
//! in Latin-1 are rejected up front — silently dropping or mangling them
//! would post a different query than the caller asked for.

use std::sync::Arc;

use tracing::debug;

use crate::client::Source;
use crate::error::RateBeerError;
use crate::extract::search::extract_search_page;
use crate::fetch::Fetcher;
use crate::models::{Beer, Brewery};

/// Path of the legacy search form endpoint.
pub(crate) const SEARCH_PATH: &str = "/findbeer.asp";

/// Form field the endpoint reads the query from.
const QUERY_FIELD: &str = "BeerName";

/// Search hits: unpopulated entities with the listing's inline fields
/// attached, so listing-level callers never pay for a per-entity fetch.
pub struct SearchResults {
    /// Beer hits, page order.
    pub beers: Vec<Beer>,
    /// Brewery hits, page order.
    pub breweries: Vec<Brewery>,
}

impl std::fmt::Debug for SearchResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchResults")
            .field("beers", &self.beers.len())
            .field("breweries", &self.breweries.len())
            .finish()
    }
}

/// Re-encodes `query` to ISO-8859-1 bytes.
///
/// # Errors
///
/// Returns [`RateBeerError::InvalidArgument`] when any character falls
/// outside Latin-1; nothing is truncated or dropped.
pub(crate) fn encode_latin1(query: &str) -> Result<Vec<u8>, RateBeerError> {
    query
        .chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| {
                RateBeerError::invalid_argument(
                    "query",
                    query,
                    "text representable in ISO-8859-1",
                )
            })
        })
        .collect()
}

/// Builds the urlencoded form body for a search query.
pub(crate) fn build_form_body(query: &str) -> Result<String, RateBeerError> {
    let bytes = encode_latin1(query)?;
    Ok(format!(
        "{QUERY_FIELD}={}",
        urlencoding::encode_binary(&bytes)
    ))
}

/// Posts a search and maps the results page onto unpopulated entities.
pub(crate) fn run_search(
    fetcher: &Arc<dyn Fetcher>,
    source: Source,
    query: &str,
) -> Result<SearchResults, RateBeerError> {
    let body = build_form_body(query)?;
    let doc = fetcher.post_form(SEARCH_PATH, body)?;
    let page = extract_search_page(&doc);
    debug!(
        query,
        beers = page.beers.len(),
        breweries = page.breweries.len(),
        "search results extracted"
    );

    Ok(SearchResults {
        beers: page
            .beers
            .into_iter()
            .map(|hit| {
                Beer::unpopulated(Arc::clone(fetcher), source, &hit.url).with_eager(
                    &hit.name,
                    hit.overall_rating,
                    hit.num_ratings,
                )
            })
            .collect(),
        breweries: page
            .breweries
            .into_iter()
            .map(|hit| {
                Brewery::unpopulated(Arc::clone(fetcher), source, &hit.url)
                    .with_eager_name(&hit.name)
            })
            .collect(),
    })
}
