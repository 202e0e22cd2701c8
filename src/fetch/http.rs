//! Blocking HTTP fetcher with centralized client construction policy.
//!
//! Networking defaults (timeouts, user-agent, compression) live here so the
//! rest of the crate stays consistent, and so the base URL is explicit
//! constructor state rather than ambient module state — test doubles and
//! alternate site hosts coexist by constructing separate fetchers.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use scraper::Html;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use super::{FetchError, Fetcher};

/// Production site base for page scraping.
pub const DEFAULT_BASE_URL: &str = "https://www.ratebeer.com";

/// Production endpoint for the JSON query API site revision.
pub const DEFAULT_GRAPH_URL: &str = "https://beta.ratebeer.com/v1/api/graphql/";

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Shared user-agent for all site traffic.
#[must_use]
pub fn default_user_agent() -> String {
    format!(
        "ratebeer/{} (https://github.com/fierce/ratebeer)",
        env!("CARGO_PKG_VERSION")
    )
}

/// Blocking document fetcher over reqwest.
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
    graph_url: Url,
}

impl HttpFetcher {
    /// Creates a fetcher against the production site hosts.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if client construction fails.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_urls(DEFAULT_BASE_URL, DEFAULT_GRAPH_URL)
    }

    /// Creates a fetcher against custom hosts (for tests and mirrors).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if either URL is invalid or
    /// client construction fails.
    pub fn with_base_urls(base_url: &str, graph_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url).map_err(|e| FetchError::ClientBuild {
            reason: format!("invalid base URL '{base_url}': {e}"),
        })?;
        let graph_url = Url::parse(graph_url).map_err(|e| FetchError::ClientBuild {
            reason: format!("invalid graph URL '{graph_url}': {e}"),
        })?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(default_user_agent())
            .gzip(true)
            .build()
            .map_err(|e| FetchError::ClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            graph_url,
        })
    }

    /// The configured site base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        // Callers occasionally hold absolute site URLs; strip back down to
        // a path so the configured base always wins.
        let relative = path
            .strip_prefix(self.base_url.as_str().trim_end_matches('/'))
            .unwrap_or(path);
        self.base_url
            .join(relative)
            .map_err(|e| FetchError::invalid_path(path, &e.to_string()))
    }

    fn read_body(url: &Url, response: reqwest::blocking::Response) -> Result<String, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response
            .text()
            .map_err(|e| FetchError::network(url.as_str(), &e))
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("base_url", &self.base_url.as_str())
            .field("graph_url", &self.graph_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, path: &str) -> Result<Html, FetchError> {
        let url = self.resolve(path)?;
        debug!(url = %url, "fetching document");
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| FetchError::network(url.as_str(), &e))?;
        let body = Self::read_body(&url, response)?;
        Ok(Html::parse_document(&body))
    }

    fn post_form(&self, path: &str, body: String) -> Result<Html, FetchError> {
        let url = self.resolve(path)?;
        debug!(url = %url, "posting form");
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .map_err(|e| FetchError::network(url.as_str(), &e))?;
        let body = Self::read_body(&url, response)?;
        Ok(Html::parse_document(&body))
    }

    fn post_graph_query(
        &self,
        operation_name: &str,
        variables: &Value,
        query: &str,
    ) -> Result<String, FetchError> {
        let url = self.graph_url.clone();
        debug!(url = %url, operation = operation_name, "posting graph query");
        let payload = json!({
            "operationName": operation_name,
            "variables": variables,
            "query": query,
        });
        let response = self
            .client
            .post(url.clone())
            .json(&payload)
            .send()
            .map_err(|e| FetchError::network(url.as_str(), &e))?;
        Self::read_body(&url, response)
    }
}
