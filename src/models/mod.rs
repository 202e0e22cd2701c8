//! Lazy entity model: Beer, Brewery, Review.
//!
//! Entities are created holding only an identity; constructing one performs
//! no I/O. The first field access (or an explicit `populate()`) triggers
//! exactly one fetch, caches every extracted field, and is never repeated —
//! including on failure: a populate error is cached on the entity and
//! re-raised identically on every later access.
//!
//! Entities are single-owner: concurrent first access to the *same*
//! instance from multiple threads is not made safe here. Independent
//! entities share nothing mutable and may live on different threads.

mod beer;
mod brewery;
mod review;

pub use beer::{Beer, ReviewOrder};
pub use brewery::Brewery;
pub use review::Review;

use crate::error::RateBeerError;

/// Where an entity stands in its populate lifecycle.
///
/// Transitions only ever leave `Unpopulated`; nothing leaves `Populated`
/// or `Failed`.
#[derive(Debug, Clone)]
pub(crate) enum PopulationState {
    /// Identity only; no fetch has happened.
    Unpopulated,
    /// All fields are resolved to a value or an explicit absence.
    Populated,
    /// The populate fetch classified as a failure; cached terminally.
    Failed(RateBeerError),
}

impl PopulationState {
    /// Returns the cached outcome, or `None` when a populate is still due.
    pub(crate) fn resolved(&self) -> Option<Result<(), RateBeerError>> {
        match self {
            Self::Unpopulated => None,
            Self::Populated => Some(Ok(())),
            Self::Failed(error) => Some(Err(error.clone())),
        }
    }

    /// True once the entity holds page data.
    pub(crate) fn is_populated(&self) -> bool {
        matches!(self, Self::Populated)
    }
}
