//! The Brewery entity and its beer listing sequence.

use std::sync::Arc;

use tracing::debug;

use crate::classify::{self, PageOutcome};
use crate::client::Source;
use crate::error::RateBeerError;
use crate::extract::brewery::{BreweryPageData, extract_beer_listing, extract_brewery_page};
use crate::extract::search::path_id;
use crate::fetch::Fetcher;
use crate::models::{Beer, PopulationState};
use crate::pagination::{PageRows, PageSource, PageWalker};

/// Listing pages end when only the header row remains.
const LISTING_MIN_ROWS: usize = 2;

/// A brewery, identified by its site-relative URL, populated on first access.
pub struct Brewery {
    fetcher: Arc<dyn Fetcher>,
    source: Source,
    url: String,
    state: PopulationState,
    name: Option<String>,
    data: BreweryPageData,
}

impl Brewery {
    pub(crate) fn unpopulated(fetcher: Arc<dyn Fetcher>, source: Source, url: &str) -> Self {
        Self {
            fetcher,
            source,
            url: url.trim().to_string(),
            state: PopulationState::Unpopulated,
            name: None,
            data: BreweryPageData::default(),
        }
    }

    /// Overlays the name a search hit or index row showed inline.
    pub(crate) fn with_eager_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// The brewery's site-relative identity.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Numeric id embedded in the identity path, when present.
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        path_id(&self.url)
    }

    /// True once a populate has succeeded.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.state.is_populated()
    }

    /// Fetches and caches the brewery's fields.
    ///
    /// Idempotent: a second call after success is a no-op; a call after a
    /// failure re-raises the cached error without refetching.
    ///
    /// # Errors
    ///
    /// Returns [`RateBeerError`] as classified from the fetched page.
    pub fn populate(&mut self) -> Result<(), RateBeerError> {
        if let Some(resolved) = self.state.resolved() {
            return resolved;
        }
        debug!(url = %self.url, "populating brewery");
        match self.fetch_fields() {
            Ok(()) => {
                self.state = PopulationState::Populated;
                Ok(())
            }
            Err(error) => {
                self.state = PopulationState::Failed(error.clone());
                Err(error)
            }
        }
    }

    fn fetch_fields(&mut self) -> Result<(), RateBeerError> {
        let doc = self.fetcher.get(&self.url)?;
        match classify::classify_brewery_page(&doc) {
            PageOutcome::NotFound => return Err(RateBeerError::not_found(&self.url)),
            PageOutcome::Aliased { target } => {
                return Err(RateBeerError::aliased(&self.url, &target));
            }
            PageOutcome::Usable => {}
        }
        let data = extract_brewery_page(&doc);
        self.name = Some(data.name.clone());
        self.data = data;
        Ok(())
    }

    /// The brewery's name. Available without a fetch when a listing
    /// attached it eagerly.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn name(&mut self) -> Result<String, RateBeerError> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }
        self.populate()?;
        Ok(self.name.clone().unwrap_or_default())
    }

    /// Classification string ("Microbrewery", "Brew Pub", ...).
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn brewery_type(&mut self) -> Result<Option<String>, RateBeerError> {
        self.populate()?;
        Ok(self.data.brewery_type.clone())
    }

    /// Street address.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn street(&mut self) -> Result<Option<String>, RateBeerError> {
        self.populate()?;
        Ok(self.data.street.clone())
    }

    /// City.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn city(&mut self) -> Result<Option<String>, RateBeerError> {
        self.populate()?;
        Ok(self.data.city.clone())
    }

    /// State or region.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn state(&mut self) -> Result<Option<String>, RateBeerError> {
        self.populate()?;
        Ok(self.data.state.clone())
    }

    /// Country.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn country(&mut self) -> Result<Option<String>, RateBeerError> {
        self.populate()?;
        Ok(self.data.country.clone())
    }

    /// Postal code.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn postal_code(&mut self) -> Result<Option<String>, RateBeerError> {
        self.populate()?;
        Ok(self.data.postal_code.clone())
    }

    /// Telephone number.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn telephone(&mut self) -> Result<Option<String>, RateBeerError> {
        self.populate()?;
        Ok(self.data.telephone.clone())
    }

    /// Brewery website URL.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn website(&mut self) -> Result<Option<String>, RateBeerError> {
        self.populate()?;
        Ok(self.data.website.clone())
    }

    /// The brewery's beers as a lazy paginated sequence.
    ///
    /// Items come up unpopulated, carrying the name and scores the listing
    /// showed inline; no fetch happens until the first item is drawn. A
    /// nonexistent brewery surfaces `NotFound` at that point, not here.
    #[must_use]
    pub fn beers(&self) -> PageWalker<Beer, impl PageSource<Beer> + use<>> {
        let fetcher = Arc::clone(&self.fetcher);
        let source = self.source;
        let base = self.url.clone();
        PageWalker::new(
            LISTING_MIN_ROWS,
            move |page: u32| -> Result<PageRows<Beer>, RateBeerError> {
                let path = format!("{base}0/{page}/");
                let doc = fetcher.get(&path)?;
                match classify::classify_brewery_page(&doc) {
                    PageOutcome::NotFound => Err(RateBeerError::not_found(&base)),
                    PageOutcome::Aliased { target } => Err(RateBeerError::aliased(&base, &target)),
                    PageOutcome::Usable => {
                        let (raw_count, rows) = extract_beer_listing(&doc);
                        let beers = rows
                            .into_iter()
                            .map(|row| {
                                Beer::unpopulated(Arc::clone(&fetcher), source, &row.url)
                                    .with_eager(&row.name, row.overall_rating, row.num_ratings)
                            })
                            .collect();
                        Ok((raw_count, beers))
                    }
                }
            },
        )
    }
}

impl std::fmt::Debug for Brewery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Brewery")
            .field("url", &self.url)
            .field("populated", &self.is_populated())
            .finish_non_exhaustive()
    }
}
