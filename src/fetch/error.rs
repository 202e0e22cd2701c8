//! Error types for the document fetcher.

use thiserror::Error;

/// Errors raised by the transport collaborator.
///
/// Reasons are carried as strings so the error stays `Clone` — entities
/// cache their populate failure and must be able to re-raise it verbatim.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The server answered with a non-success status code.
    #[error("HTTP {status} fetching '{url}'")]
    Status {
        /// The absolute URL that was requested.
        url: String,
        /// The response status code.
        status: u16,
    },

    /// The request failed below the HTTP layer (DNS, connect, timeout).
    #[error("network error fetching '{url}': {reason}")]
    Network {
        /// The absolute URL that was requested.
        url: String,
        /// Transport-level failure description.
        reason: String,
    },

    /// A path could not be joined onto the configured base URL.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The path that failed to resolve.
        path: String,
        /// Why joining failed.
        reason: String,
    },

    /// The HTTP client itself could not be constructed.
    #[error("HTTP client construction failed: {reason}")]
    ClientBuild {
        /// Builder failure description.
        reason: String,
    },
}

impl FetchError {
    /// Creates a `Network` error from a reqwest failure.
    #[must_use]
    pub fn network(url: &str, error: &reqwest::Error) -> Self {
        Self::Network {
            url: url.to_string(),
            reason: error.to_string(),
        }
    }

    /// Creates an `InvalidPath` error.
    #[must_use]
    pub fn invalid_path(path: &str, reason: &str) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}
