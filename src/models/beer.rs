//! The Beer entity and its review sequence.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::classify::{self, PageOutcome};
use crate::client::Source;
use crate::error::RateBeerError;
use crate::extract::beer::{LinkRef, extract_beer_page};
use crate::extract::review::extract_review_page;
use crate::extract::search::path_id;
use crate::fetch::Fetcher;
use crate::graph;
use crate::models::{Brewery, PopulationState, Review};
use crate::pagination::{PageRows, PageSource, PageWalker};

/// Review sort orders accepted by the site.
///
/// Each maps to a fixed page-parameter value; there is no free-form sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOrder {
    /// Newer reviews first.
    MostRecent,
    /// Reviews by the site's top raters first.
    TopRaters,
    /// Highest-scored reviews first.
    HighestScore,
}

impl ReviewOrder {
    /// The page-parameter value the site expects.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::MostRecent => 1,
            Self::TopRaters => 2,
            Self::HighestScore => 3,
        }
    }
}

/// A beer, identified by its site-relative URL, populated on first access.
pub struct Beer {
    fetcher: Arc<dyn Fetcher>,
    source: Source,
    url: String,
    state: PopulationState,
    name: Option<String>,
    brewery: Option<LinkRef>,
    brewed_at: Option<LinkRef>,
    style: Option<String>,
    style_url: Option<String>,
    overall_rating: Option<u32>,
    style_rating: Option<u32>,
    mean_rating: Option<f64>,
    weighted_avg: Option<f64>,
    num_ratings: Option<u32>,
    abv: Option<f64>,
    ibu: Option<u32>,
    calories: Option<f64>,
    seasonal: Option<String>,
    tags: BTreeSet<String>,
    description: Option<String>,
    retired: bool,
    image_url: Option<String>,
}

impl Beer {
    pub(crate) fn unpopulated(fetcher: Arc<dyn Fetcher>, source: Source, url: &str) -> Self {
        Self {
            fetcher,
            source,
            url: url.trim().to_string(),
            state: PopulationState::Unpopulated,
            name: None,
            brewery: None,
            brewed_at: None,
            style: None,
            style_url: None,
            overall_rating: None,
            style_rating: None,
            mean_rating: None,
            weighted_avg: None,
            num_ratings: None,
            abv: None,
            ibu: None,
            calories: None,
            seasonal: None,
            tags: BTreeSet::new(),
            description: None,
            retired: false,
            image_url: None,
        }
    }

    /// Overlays listing-level fields a search or listing row showed inline,
    /// so callers that only need those never pay for a fetch.
    pub(crate) fn with_eager(
        mut self,
        name: &str,
        overall_rating: Option<u32>,
        num_ratings: Option<u32>,
    ) -> Self {
        self.name = Some(name.to_string());
        self.overall_rating = overall_rating;
        self.num_ratings = num_ratings;
        self
    }

    /// The beer's site-relative identity.
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

    /// Fetches and caches the beer's fields.
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
        debug!(url = %self.url, source = ?self.source, "populating beer");
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
        match self.source {
            Source::HtmlPages => self.fetch_from_page(),
            Source::GraphApi => self.fetch_from_graph(),
        }
    }

    fn fetch_from_page(&mut self) -> Result<(), RateBeerError> {
        let doc = self.fetcher.get(&self.url)?;
        match classify::classify_beer_page(&doc) {
            PageOutcome::NotFound => return Err(RateBeerError::not_found(&self.url)),
            PageOutcome::Aliased { target } => {
                return Err(RateBeerError::aliased(&self.url, &target));
            }
            PageOutcome::Usable => {}
        }

        let data = extract_beer_page(&doc);
        self.name = Some(data.name);
        self.brewery = data.brewery;
        self.brewed_at = data.brewed_at;
        self.style = data.style;
        self.style_url = data.style_url;
        self.overall_rating = data.overall_rating;
        self.style_rating = data.style_rating;
        self.description = data.description;
        self.retired = data.retired;
        self.image_url = data.image_url;
        self.tags = data.tags;
        if let Some(canonical) = data.canonical_url {
            self.url = canonical;
        }

        let fields = data.fields;
        self.num_ratings = fields.int("num_ratings").and_then(|v| u32::try_from(v).ok());
        self.mean_rating = fields.float("mean_rating");
        self.weighted_avg = fields.float("weighted_avg");
        self.abv = fields.float("abv");
        self.ibu = fields.int("ibu").and_then(|v| u32::try_from(v).ok());
        self.calories = fields.float("calories");
        self.seasonal = fields.text("seasonal").map(str::to_string);
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn fetch_from_graph(&mut self) -> Result<(), RateBeerError> {
        let data = graph::fetch_beer_info(self.fetcher.as_ref(), &self.url)?;
        let fields = &data.fields;
        self.name = fields.text("name").map(str::to_string);
        self.description = fields.text("description").map(str::to_string);
        self.abv = fields.float("abv");
        self.ibu = fields.int("ibu").and_then(|v| u32::try_from(v).ok());
        self.calories = fields.float("calories");
        self.overall_rating = fields.float("overall_rating").map(|v| v.round() as u32);
        self.style_rating = fields.float("style_rating").map(|v| v.round() as u32);
        self.mean_rating = fields.float("mean_rating");
        self.weighted_avg = fields.float("weighted_avg");
        self.num_ratings = fields.int("num_ratings").and_then(|v| u32::try_from(v).ok());
        self.seasonal = fields.text("seasonal").map(str::to_string);
        self.retired = fields.bool("retired").unwrap_or(false);
        self.image_url = fields.text("image_url").map(str::to_string);
        self.style = fields.text("style").map(str::to_string);
        self.style_url = data.style_url.clone();
        self.brewery = data.brewery.clone();
        self.brewed_at = data.brewed_at.clone();
        self.tags = data.tags;
        Ok(())
    }

    /// The beer's name. Available without a fetch when a listing attached
    /// it eagerly.
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

    /// The owning brewery, as a fresh unpopulated entity carrying the
    /// reference's identity and display name.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn brewery(&mut self) -> Result<Option<Brewery>, RateBeerError> {
        self.populate()?;
        Ok(self.brewery.as_ref().map(|r| self.brewery_ref(r)))
    }

    /// The contract brewery, when the beer is brewed at a different
    /// brewery than the one that owns it.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn brewed_at(&mut self) -> Result<Option<Brewery>, RateBeerError> {
        self.populate()?;
        Ok(self.brewed_at.as_ref().map(|r| self.brewery_ref(r)))
    }

    fn brewery_ref(&self, link: &LinkRef) -> Brewery {
        Brewery::unpopulated(Arc::clone(&self.fetcher), self.source, &link.url)
            .with_eager_name(&link.name)
    }

    /// Overall rating out of 100. Available without a fetch when a listing
    /// attached it eagerly.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn overall_rating(&mut self) -> Result<Option<u32>, RateBeerError> {
        if let Some(v) = self.overall_rating {
            return Ok(Some(v));
        }
        self.populate()?;
        Ok(self.overall_rating)
    }

    /// Rating count. Available without a fetch when a listing attached it
    /// eagerly.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn num_ratings(&mut self) -> Result<Option<u32>, RateBeerError> {
        if let Some(v) = self.num_ratings {
            return Ok(Some(v));
        }
        self.populate()?;
        Ok(self.num_ratings)
    }

    /// Within-style rating out of 100.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn style_rating(&mut self) -> Result<Option<u32>, RateBeerError> {
        self.populate()?;
        Ok(self.style_rating)
    }

    /// Mean rating out of 5.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn mean_rating(&mut self) -> Result<Option<f64>, RateBeerError> {
        self.populate()?;
        Ok(self.mean_rating)
    }

    /// Weighted average rating out of 5.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn weighted_avg(&mut self) -> Result<Option<f64>, RateBeerError> {
        self.populate()?;
        Ok(self.weighted_avg)
    }

    /// Alcohol by volume, percent.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn abv(&mut self) -> Result<Option<f64>, RateBeerError> {
        self.populate()?;
        Ok(self.abv)
    }

    /// International bitterness units.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn ibu(&mut self) -> Result<Option<u32>, RateBeerError> {
        self.populate()?;
        Ok(self.ibu)
    }

    /// Estimated calories.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn calories(&mut self) -> Result<Option<f64>, RateBeerError> {
        self.populate()?;
        Ok(self.calories)
    }

    /// Season note; the site also parks miscellaneous brew information here.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn seasonal(&mut self) -> Result<Option<String>, RateBeerError> {
        self.populate()?;
        Ok(self.seasonal.clone())
    }

    /// Style name.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn style(&mut self) -> Result<Option<String>, RateBeerError> {
        self.populate()?;
        Ok(self.style.clone())
    }

    /// Path of the style's listing page.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn style_url(&mut self) -> Result<Option<String>, RateBeerError> {
        self.populate()?;
        Ok(self.style_url.clone())
    }

    /// Commercial description; absent when the site shows its placeholder.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn description(&mut self) -> Result<Option<String>, RateBeerError> {
        self.populate()?;
        Ok(self.description.clone())
    }

    /// Whether the beer is retired.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn retired(&mut self) -> Result<bool, RateBeerError> {
        self.populate()?;
        Ok(self.retired)
    }

    /// Tag labels.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn tags(&mut self) -> Result<BTreeSet<String>, RateBeerError> {
        self.populate()?;
        Ok(self.tags.clone())
    }

    /// Beer image URL.
    ///
    /// # Errors
    ///
    /// Returns the populate error, first raised or cached.
    pub fn image_url(&mut self) -> Result<Option<String>, RateBeerError> {
        self.populate()?;
        Ok(self.image_url.clone())
    }

    /// The beer's reviews as a lazy paginated sequence.
    ///
    /// No fetch happens until the first item is drawn; a nonexistent beer
    /// surfaces `NotFound` at that point, not here. The sequence is
    /// restartable by calling this again, and ends permanently at the
    /// first page with no review containers.
    #[must_use]
    pub fn reviews(&self, order: ReviewOrder) -> PageWalker<Review, impl PageSource<Review> + use<>> {
        let fetcher = Arc::clone(&self.fetcher);
        let base = self.url.clone();
        let code = order.code();
        PageWalker::new(1, move |page: u32| -> Result<PageRows<Review>, RateBeerError> {
            let path = format!("{base}{code}/{page}/");
            let doc = fetcher.get(&path)?;
            match classify::classify_beer_page(&doc) {
                PageOutcome::NotFound => Err(RateBeerError::not_found(&base)),
                PageOutcome::Aliased { target } => Err(RateBeerError::aliased(&base, &target)),
                PageOutcome::Usable => {
                    let (raw_count, rows) = extract_review_page(&doc);
                    Ok((raw_count, rows.into_iter().map(Review::from).collect()))
                }
            }
        })
    }
}

impl std::fmt::Debug for Beer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Beer")
            .field("url", &self.url)
            .field("populated", &self.is_populated())
            .finish_non_exhaustive()
    }
}
