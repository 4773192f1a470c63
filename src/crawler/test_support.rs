//! In-memory fetcher for crawler unit tests

use crate::crawler::fetcher::PageFetcher;
use crate::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// `PageFetcher` over a fixed link graph
///
/// URLs that were never added fail with HTTP 404. Every call is counted, as
/// is the largest number of fetches that were in flight at once.
#[derive(Debug, Default)]
pub(crate) struct StaticFetcher {
    pages: HashMap<String, Vec<String>>,
    delay: Option<Duration>,
    fetches: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StaticFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a page and the raw links it returns
    pub(crate) fn with_page<I, S>(mut self, url: &str, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages
            .insert(url.to_string(), links.into_iter().map(Into::into).collect());
        self
    }

    /// Makes every fetch take `delay`
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn fetch_count(&self, url: &str) -> usize {
        self.counts().get(url).copied().unwrap_or(0)
    }

    pub(crate) fn total_fetches(&self) -> usize {
        self.counts().values().sum()
    }

    /// Highest number of fetches that overlapped in time
    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn counts(&self) -> MutexGuard<'_, HashMap<String, usize>> {
        self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch_links(&self, url: &str) -> Result<Vec<String>, FetchError> {
        *self.counts().entry(url.to_string()).or_insert(0) += 1;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        match self.delay {
            Some(delay) => tokio::time::sleep(delay).await,
            // Let sibling workers interleave as they would around real I/O
            None => tokio::task::yield_now().await,
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_page() {
        let fetcher = StaticFetcher::new().with_page("https://example.com", ["https://example.com/a"]);
        let links = fetcher.fetch_links("https://example.com").await.unwrap();
        assert_eq!(links, vec!["https://example.com/a"]);
        assert_eq!(fetcher.fetch_count("https://example.com"), 1);
        assert_eq!(fetcher.max_in_flight(), 1);
    }

    #[tokio::test]
    async fn test_unknown_page_is_404() {
        let fetcher = StaticFetcher::new();
        let result = fetcher.fetch_links("https://example.com/missing").await;
        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
        assert_eq!(fetcher.fetch_count("https://example.com/missing"), 1);
        assert_eq!(fetcher.total_fetches(), 1);
    }

    #[tokio::test]
    async fn test_overlapping_fetches_counted() {
        let fetcher = StaticFetcher::new()
            .with_page("https://example.com/a", Vec::<String>::new())
            .with_page("https://example.com/b", Vec::<String>::new())
            .with_delay(Duration::from_millis(20));

        let (a, b) = tokio::join!(
            fetcher.fetch_links("https://example.com/a"),
            fetcher.fetch_links("https://example.com/b")
        );
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(fetcher.max_in_flight(), 2);
    }
}
