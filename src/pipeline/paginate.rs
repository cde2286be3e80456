// src/pipeline/paginate.rs

//! Pagination driver.
//!
//! Follows `next` links of a listing endpoint one page at a time. A page that
//! cannot be fetched ends the walk with an error that callers can tell apart
//! from reaching the last page.

use crate::error::{AppError, Result};
use crate::models::CatalogPage;
use crate::services::ResourceFetcher;

/// How a category walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageWalk {
    /// Reached a page without a `next` link
    Exhausted { pages: usize },
    /// Stopped at the configured page cap with more pages left
    Limited { pages: usize },
    /// A page fetch or decode failed
    Aborted {
        pages: usize,
        url: String,
        reason: String,
    },
}

impl PageWalk {
    pub fn pages(&self) -> usize {
        match self {
            PageWalk::Exhausted { pages }
            | PageWalk::Limited { pages }
            | PageWalk::Aborted { pages, .. } => *pages,
        }
    }
}

/// Page-by-page cursor over one listing.
pub struct Paginator<'a> {
    fetcher: &'a dyn ResourceFetcher,
    next: Option<String>,
    pages: usize,
    max_pages: Option<usize>,
}

impl<'a> Paginator<'a> {
    /// Start at `start_url`, typically a category root.
    pub fn new(fetcher: &'a dyn ResourceFetcher, start_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            next: Some(start_url.into()),
            pages: 0,
            max_pages: None,
        }
    }

    /// Stop after `max_pages` pages.
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Pages fetched so far.
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// True when the page cap, not the listing, is what stops the walk.
    pub fn is_limited(&self) -> bool {
        self.next.is_some() && self.max_pages.is_some_and(|max| self.pages >= max)
    }

    /// Fetch the next page.
    ///
    /// Returns `Ok(None)` once the listing is exhausted or the page cap is hit.
    /// After an error the paginator is finished and keeps returning `Ok(None)`.
    pub async fn next_page(&mut self) -> Result<Option<(String, CatalogPage)>> {
        if self.is_limited() {
            return Ok(None);
        }
        let Some(url) = self.next.take() else {
            return Ok(None);
        };

        let value = match self.fetcher.fetch(&url).await {
            Ok(Some(value)) => value,
            Ok(None) => {
                return Err(AppError::pagination(
                    url,
                    "page request failed or returned no JSON",
                ));
            }
            Err(e) => return Err(AppError::pagination(url, e)),
        };

        let page: CatalogPage =
            serde_json::from_value(value).map_err(|e| AppError::pagination(url.as_str(), e))?;

        self.pages += 1;
        self.next = page.next_url().map(str::to_string);
        Ok(Some((url, page)))
    }
}
