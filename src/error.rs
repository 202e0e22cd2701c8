//! Error taxonomy for scraping operations.
//!
//! Every failure a caller can see is a distinct, inspectable condition:
//! a page that does not exist, an entity that moved to a new identity, a
//! response the site revision cannot be parsed from, a rejected argument,
//! or an opaque transport failure. The three page-level conditions require
//! different caller-side remediation (give up / re-fetch under the new
//! identity / retry later), so they are never collapsed into one variant.

use thiserror::Error;

use crate::fetch::FetchError;

/// Errors surfaced by entity population, pagination, and search.
///
/// Cloneable so a lazily populated entity can cache its failure and
/// re-raise the identical condition on every subsequent field access.
#[derive(Debug, Clone, Error)]
pub enum RateBeerError {
    /// The requested page does not exist (the site serves a placeholder
    /// "reference" page or a block page instead of a 404 status).
    #[error("page not found: '{url}'\n  Suggestion: Check the URL path; the entity may have been removed")]
    NotFound {
        /// The identity that was requested.
        url: String,
    },

    /// The entity moved: the old path is still reachable but the page
    /// points at a different canonical identity.
    #[error("'{url}' is an alias for '{new_url}'\n  Suggestion: Re-fetch using the new identity")]
    Aliased {
        /// The identity that was requested.
        url: String,
        /// The identity the site says is current.
        new_url: String,
    },

    /// The response body could not be interpreted under the configured
    /// site revision. Never conflated with [`RateBeerError::NotFound`]:
    /// a schema problem is not an absence.
    #[error("malformed response for '{url}': {reason}")]
    MalformedResponse {
        /// The identity that was requested.
        url: String,
        /// Why interpretation failed.
        reason: String,
    },

    /// A caller-supplied argument is outside the accepted set. Raised
    /// synchronously, before any fetch is attempted.
    #[error("invalid value '{value}' for `{parameter}` (allowed: {allowed})")]
    InvalidArgument {
        /// Name of the rejected parameter.
        parameter: &'static str,
        /// The value the caller passed.
        value: String,
        /// Human-readable description of the accepted set.
        allowed: &'static str,
    },

    /// The transport collaborator failed. Passed through opaquely, never
    /// reinterpreted as one of the page-level conditions.
    #[error("transport failure: {0}")]
    Transport(#[from] FetchError),
}

impl RateBeerError {
    /// Creates a `NotFound` error for the given identity.
    #[must_use]
    pub fn not_found(url: &str) -> Self {
        Self::NotFound {
            url: url.to_string(),
        }
    }

    /// Creates an `Aliased` error from the old identity to the new one.
    #[must_use]
    pub fn aliased(url: &str, new_url: &str) -> Self {
        Self::Aliased {
            url: url.to_string(),
            new_url: new_url.to_string(),
        }
    }

    /// Creates a `MalformedResponse` error.
    #[must_use]
    pub fn malformed(url: &str, reason: &str) -> Self {
        Self::MalformedResponse {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an `InvalidArgument` error.
    #[must_use]
    pub fn invalid_argument(parameter: &'static str, value: &str, allowed: &'static str) -> Self {
        Self::InvalidArgument {
            parameter,
            value: value.to_string(),
            allowed,
        }
    }
}
