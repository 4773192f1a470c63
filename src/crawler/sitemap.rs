//! Sitemap data types and the shared recorder workers write into

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A crawled page and the eligible links found on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Normalized URL of the page
    pub url: String,

    /// Normalized same-domain, allowed links, in document order
    pub links: Vec<String>,
}

impl Page {
    /// Creates a page with no links yet
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            links: Vec::new(),
        }
    }
}

/// Completed crawl result: one entry per successfully crawled URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sitemap {
    pages: BTreeMap<String, Page>,
}

impl Sitemap {
    /// Creates an empty sitemap
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page, returning false if its URL was already present
    ///
    /// An existing entry is never overwritten.
    pub fn add_page(&mut self, page: Page) -> bool {
        if self.pages.contains_key(&page.url) {
            return false;
        }
        self.pages.insert(page.url.clone(), page);
        true
    }

    /// Looks up a crawled page by URL
    pub fn get(&self, url: &str) -> Option<&Page> {
        self.pages.get(url)
    }

    /// Returns true if `url` was crawled
    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    /// Number of crawled pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if nothing was crawled
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Crawled pages in URL order
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    /// Crawled URLs in order
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    /// Total number of recorded links across all pages
    pub fn total_links(&self) -> usize {
        self.pages.values().map(|p| p.links.len()).sum()
    }
}

/// Append-only sitemap shared by the workers of one crawl
#[derive(Debug, Default)]
pub struct SitemapRecorder {
    inner: Mutex<Sitemap>,
}

impl SitemapRecorder {
    /// Creates an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a crawled page
    ///
    /// Returns false (and keeps the first entry) if the URL was already
    /// recorded. With a correct frontier this never happens.
    pub fn record(&self, page: Page) -> bool {
        let url = page.url.clone();
        let added = self.lock().add_page(page);
        if !added {
            tracing::warn!("Page {} was recorded twice; keeping the first entry", url);
        }
        added
    }

    /// Number of pages recorded so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies out the pages recorded so far
    pub fn snapshot(&self) -> Sitemap {
        self.lock().clone()
    }

    /// Consumes the recorder and returns the sitemap
    pub fn into_sitemap(self) -> Sitemap {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, Sitemap> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
