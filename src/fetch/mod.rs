//! Document fetching for the scraping core.
//!
//! This module is the transport seam: everything above it works against the
//! [`Fetcher`] trait, so tests (and alternate site configurations) can swap
//! in doubles without touching the extraction or entity layers.
//!
//! - [`Fetcher`] - object-safe trait the entity model and walkers consume
//! - [`HttpFetcher`] - blocking reqwest implementation with an explicit base URL
//! - [`FetchError`] - transport failures, cloneable for error caching
//!
//! Fetching is synchronous and blocking throughout: one request at a time,
//! no internal retry, no backoff. A failed fetch surfaces immediately.

mod error;
mod http;

pub use error::FetchError;
pub use http::HttpFetcher;

use scraper::Html;
use serde_json::Value;

/// Fetches site documents for the entity model and pagination walkers.
///
/// `path` arguments are site-relative (e.g. `/beer/deschutes-inversion-ipa/55610/`);
/// implementations resolve them against their configured base URL.
pub trait Fetcher: Send + Sync {
    /// Fetches a page by site-relative path and parses it into a document tree.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the request fails or the server answers
    /// with a non-success status.
    fn get(&self, path: &str) -> Result<Html, FetchError>;

    /// Posts an already-encoded `application/x-www-form-urlencoded` body and
    /// parses the response into a document tree.
    ///
    /// The body arrives pre-encoded because the site's legacy form endpoints
    /// expect Latin-1 bytes; encoding is the search module's concern.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the request fails or the server answers
    /// with a non-success status.
    fn post_form(&self, path: &str, body: String) -> Result<Html, FetchError>;

    /// Posts a query to the JSON API endpoint and returns the raw response body.
    ///
    /// The body is returned unparsed: distinguishing a malformed response
    /// from a genuine absence is the classifier's job, not the transport's.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the request fails or the server answers
    /// with a non-success status.
    fn post_graph_query(
        &self,
        operation_name: &str,
        variables: &Value,
        query: &str,
    ) -> Result<String, FetchError>;
}
