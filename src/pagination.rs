//! Lazy page walking over the site's numbered listing pages.
//!
//! The site offers no "last page" indicator: the only termination signal is
//! a page whose raw extracted row count falls below the listing's minimum
//! threshold (zero review containers, or a bare header row). The walker
//! fetches page 1, 2, 3, ... on demand, buffers each page's usable rows,
//! and stops — permanently — at the first under-threshold page or error.
//!
//! Sequences are restartable by reconstruction (ask the entity for a fresh
//! walker), not rewindable in place. Dropping a walker mid-sequence needs
//! no cleanup; nothing is held open between pages.

use std::collections::VecDeque;

use tracing::debug;

use crate::error::RateBeerError;

/// One fetched-and-extracted listing page: the raw row count the
/// termination threshold is judged against, and the usable rows (filtered
/// rows are simply missing here — filtering never consumes a page-advance).
pub type PageRows<T> = (usize, Vec<T>);

/// Fetches and extracts the numbered page of a listing.
pub trait PageSource<T>: Send {
    /// Produces page `page` (1-based).
    ///
    /// # Errors
    ///
    /// Returns [`RateBeerError`] when the fetch fails or the page
    /// classifies as a failure signal.
    fn fetch_page(&mut self, page: u32) -> Result<PageRows<T>, RateBeerError>;
}

impl<T, F> PageSource<T> for F
where
    F: FnMut(u32) -> Result<PageRows<T>, RateBeerError> + Send,
{
    fn fetch_page(&mut self, page: u32) -> Result<PageRows<T>, RateBeerError> {
        self(page)
    }
}

/// Lazy iterator over a paginated listing.
///
/// Yields `Ok(item)` per usable row, in page order. An error is yielded
/// exactly once, in place of the page that failed, and ends the sequence —
/// the sequence is never silently truncated to empty.
pub struct PageWalker<T, S: PageSource<T>> {
    source: S,
    min_rows: usize,
    page: u32,
    buffer: VecDeque<T>,
    done: bool,
}

impl<T, S: PageSource<T>> std::fmt::Debug for PageWalker<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageWalker")
            .field("min_rows", &self.min_rows)
            .field("page", &self.page)
            .field("buffered", &self.buffer.len())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl<T, S: PageSource<T>> PageWalker<T, S> {
    /// Creates a walker starting at page 1.
    ///
    /// `min_rows` is the listing's termination threshold: a page whose raw
    /// row count is below it ends the sequence.
    #[must_use]
    pub fn new(min_rows: usize, source: S) -> Self {
        Self {
            source,
            min_rows,
            page: 1,
            buffer: VecDeque::new(),
            done: false,
        }
    }
}

impl<T, S: PageSource<T>> Iterator for PageWalker<T, S> {
    type Item = Result<T, RateBeerError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.done {
                return None;
            }
            match self.source.fetch_page(self.page) {
                Ok((raw_count, items)) => {
                    debug!(page = self.page, raw_count, usable = items.len(), "walked listing page");
                    if raw_count < self.min_rows {
                        self.done = true;
                        return None;
                    }
                    self.page += 1;
                    self.buffer.extend(items);
                }
                Err(error) => {
                    self.done = true;
                    return Some(Err(error));
                }
            }
        }
    }
}
