//! The identity-addressed API surface.
//!
//! [`RateBeer`] holds the transport handle and the configured site
//! revision; everything else — entities, sequences, search results — is
//! built from those two pieces. No ambient state: two clients with
//! different bases or revisions coexist freely.

use std::sync::Arc;

use tracing::debug;

use crate::classify;
use crate::error::RateBeerError;
use crate::extract::search::path_id;
use crate::extract::style::{BeerStyle, extract_brewer_index, extract_style_list, extract_style_listing};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::models::{Beer, Brewery};
use crate::pagination::{PageRows, PageSource, PageWalker};
use crate::search::{SearchResults, run_search};

/// Path of the beer styles directory page.
const STYLES_PATH: &str = "/beerstyles/";

/// Listing tables end when only the header row remains.
const LISTING_MIN_ROWS: usize = 2;

/// Which site revision entity populates read from.
///
/// The page markup and the JSON query API carry the same fields through
/// different vocabularies; both funnel into the same canonical mapper, so
/// switching revisions is a configuration choice, not a code path fork for
/// callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Source {
    /// Scrape the styled HTML pages (the long-lived site layout).
    #[default]
    HtmlPages,
    /// Query the JSON API introduced in later site revisions.
    GraphApi,
}

/// Sort axis for style listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleSort {
    /// Highest-rated beers first.
    Overall,
    /// Newest and trending beers first.
    Trending,
}

impl StyleSort {
    fn code(self) -> u8 {
        match self {
            Self::Overall => 0,
            Self::Trending => 1,
        }
    }
}

/// Sort direction for style listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Best-to-worst; the site's default.
    Descending,
    /// Worst-to-best.
    Ascending,
}

impl SortOrder {
    fn code(self) -> u8 {
        match self {
            Self::Descending => 0,
            Self::Ascending => 1,
        }
    }
}

/// Entry point: identity-addressed accessors over one site configuration.
pub struct RateBeer {
    fetcher: Arc<dyn Fetcher>,
    source: Source,
}

impl RateBeer {
    /// Creates a client against the production site.
    ///
    /// # Errors
    ///
    /// Returns [`RateBeerError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self, RateBeerError> {
        Ok(Self::with_fetcher(Arc::new(HttpFetcher::new()?)))
    }

    /// Creates a client over an explicit transport (tests, mirrors).
    #[must_use]
    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            source: Source::default(),
        }
    }

    /// Selects the site revision entity populates read from.
    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    /// An unpopulated beer for the given identity. Performs no I/O.
    #[must_use]
    pub fn get_beer(&self, url: &str) -> Beer {
        Beer::unpopulated(Arc::clone(&self.fetcher), self.source, url)
    }

    /// An unpopulated brewery for the given identity. Performs no I/O.
    #[must_use]
    pub fn get_brewery(&self, url: &str) -> Brewery {
        Brewery::unpopulated(Arc::clone(&self.fetcher), self.source, url)
    }

    /// Searches beers and breweries by free text.
    ///
    /// Hits come back unpopulated with the listing's inline fields
    /// attached; reading anything else triggers that entity's populate.
    ///
    /// # Errors
    ///
    /// Returns [`RateBeerError::InvalidArgument`] for queries outside
    /// ISO-8859-1 (before any I/O) and [`RateBeerError::Transport`] when
    /// the post fails.
    pub fn search(&self, query: &str) -> Result<SearchResults, RateBeerError> {
        run_search(&self.fetcher, self.source, query)
    }

    /// The style directory from the beer styles page.
    ///
    /// # Errors
    ///
    /// Returns [`RateBeerError::NotFound`] when the site serves its block
    /// page, [`RateBeerError::Transport`] when the fetch fails.
    pub fn beer_style_list(&self) -> Result<Vec<BeerStyle>, RateBeerError> {
        let doc = self.fetcher.get(STYLES_PATH)?;
        if classify::page_is_blocked(&doc) {
            return Err(RateBeerError::not_found(STYLES_PATH));
        }
        let styles = extract_style_list(&doc);
        debug!(count = styles.len(), "extracted style directory");
        Ok(styles)
    }

    /// The beers of one style as a lazy sequence.
    ///
    /// The listing endpoint serves a single ranked table; the sequence
    /// ends at its final row. Items come up unpopulated with the listing's
    /// inline fields attached.
    ///
    /// # Errors
    ///
    /// Returns [`RateBeerError::InvalidArgument`] when `style_url` carries
    /// no numeric style id. Raised before any I/O.
    pub fn beer_style(
        &self,
        style_url: &str,
        sort: StyleSort,
        order: SortOrder,
    ) -> Result<PageWalker<Beer, impl PageSource<Beer> + use<>>, RateBeerError> {
        let Some(style_id) = path_id(style_url) else {
            return Err(RateBeerError::invalid_argument(
                "style_url",
                style_url,
                "a style path with a numeric id segment",
            ));
        };

        let fetcher = Arc::clone(&self.fetcher);
        let source = self.source;
        let listing_url = style_url.to_string();
        let path = format!(
            "/ajax/top-beer-by-style.asp?style={style_id}&sort={}&order={}&min=10&max=9999&retired=0&new=0&mine=0&",
            sort.code(),
            order.code()
        );

        Ok(PageWalker::new(
            LISTING_MIN_ROWS,
            move |page: u32| -> Result<PageRows<Beer>, RateBeerError> {
                // The endpoint is a single ranked table, not a numbered
                // series; a synthetic empty page terminates the walk.
                if page > 1 {
                    return Ok((0, Vec::new()));
                }
                let doc = fetcher.post_form(&path, String::new())?;
                if classify::page_is_blocked(&doc) {
                    return Err(RateBeerError::not_found(&listing_url));
                }
                let (raw_count, rows) = extract_style_listing(&doc);
                let beers = rows
                    .into_iter()
                    .map(|row| {
                        Beer::unpopulated(Arc::clone(&fetcher), source, &row.url)
                            .with_eager(&row.name, row.overall_rating, row.num_ratings)
                    })
                    .collect();
                Ok((raw_count, beers))
            },
        ))
    }

    /// Breweries whose names start with `letter`, from the alphabetical
    /// brewers index.
    ///
    /// # Errors
    ///
    /// Returns [`RateBeerError::InvalidArgument`] for a non-ASCII-letter
    /// input (before any I/O), [`RateBeerError::NotFound`] when the site
    /// serves its block page, [`RateBeerError::Transport`] when the fetch
    /// fails.
    pub fn brewers_by_alpha(&self, letter: char) -> Result<Vec<Brewery>, RateBeerError> {
        if !letter.is_ascii_alphabetic() {
            return Err(RateBeerError::invalid_argument(
                "letter",
                &letter.to_string(),
                "a single ASCII letter",
            ));
        }
        let path = format!("/browsebrewers-{}.htm", letter.to_ascii_uppercase());
        let doc = self.fetcher.get(&path)?;
        if classify::page_is_blocked(&doc) {
            return Err(RateBeerError::not_found(&path));
        }
        Ok(extract_brewer_index(&doc)
            .into_iter()
            .map(|entry| {
                Brewery::unpopulated(Arc::clone(&self.fetcher), self.source, &entry.url)
                    .with_eager_name(&entry.name)
            })
            .collect())
    }
}

impl std::fmt::Debug for RateBeer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateBeer")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
