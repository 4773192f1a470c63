//! Crawl worker: one instance per pool slot
//!
//! A worker repeatedly takes a page from the frontier, fetches it, filters
//! and enqueues the links it finds, and records the page in the sitemap. It
//! stops the first time it finds the frontier empty.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::Frontier;
use crate::crawler::sitemap::{Page, SitemapRecorder};
use crate::state::WorkerState;
use crate::url::LinkFilter;
use std::sync::Arc;

/// What a worker did before it stopped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerReport {
    /// Pool slot of the worker
    pub worker_id: usize,

    /// Pages fetched and recorded
    pub pages_crawled: usize,

    /// Pages dropped because their fetch failed
    pub fetch_failures: usize,
}

/// A single crawl worker bound to the shared crawl state
pub struct Worker {
    id: usize,
    state: WorkerState,
    frontier: Arc<Frontier>,
    sitemap: Arc<SitemapRecorder>,
    fetcher: Arc<dyn PageFetcher>,
    filter: Arc<LinkFilter>,
    verbose: bool,
    report: WorkerReport,
}

impl Worker {
    /// Creates an idle worker
    pub fn new(
        id: usize,
        frontier: Arc<Frontier>,
        sitemap: Arc<SitemapRecorder>,
        fetcher: Arc<dyn PageFetcher>,
        filter: Arc<LinkFilter>,
        verbose: bool,
    ) -> Self {
        Self {
            id,
            state: WorkerState::Idle,
            frontier,
            sitemap,
            fetcher,
            filter,
            verbose,
            report: WorkerReport {
                worker_id: id,
                ..WorkerReport::default()
            },
        }
    }

    /// Current state of the worker
    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// What the worker has done so far
    pub fn report(&self) -> WorkerReport {
        self.report
    }

    /// Takes one page from the frontier and crawls it
    ///
    /// Returns false, without changing state, if the frontier was empty.
    /// A page whose fetch fails is logged and dropped.
    pub async fn step(&mut self) -> bool {
        let Some(mut page) = self.frontier.take() else {
            return false;
        };

        self.transition(WorkerState::Fetching);
        let raw_links = match self.fetcher.fetch_links(&page.url).await {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!("Error reading {}: {}", page.url, e);
                self.report.fetch_failures += 1;
                self.transition(WorkerState::Idle);
                return true;
            }
        };

        self.transition(WorkerState::Linking);
        page.links = self.link(&raw_links);

        self.transition(WorkerState::Recording);
        self.record(page);
        self.report.pages_crawled += 1;

        self.transition(WorkerState::Idle);
        true
    }

    /// Runs the worker until it finds the frontier empty
    pub async fn run(mut self) -> WorkerReport {
        tracing::debug!("Worker {} started", self.id);

        while self.step().await {}
        self.transition(WorkerState::Stopped);

        tracing::debug!(
            "Worker {} stopped after {} pages ({} failed)",
            self.id,
            self.report.pages_crawled,
            self.report.fetch_failures
        );

        self.report
    }

    /// Filters raw links, enqueues new ones, and returns the page's link list
    ///
    /// Every accepted link is kept, whether or not this worker was the one
    /// that enqueued it.
    fn link(&self, raw_links: &[String]) -> Vec<String> {
        let mut links = Vec::new();
        for raw in raw_links {
            let Some(link) = self.filter.accept(raw) else {
                continue;
            };
            if self.frontier.try_enqueue(&link) {
                tracing::trace!("Worker {} enqueued {}", self.id, link);
            }
            links.push(link);
        }
        links
    }

    fn record(&self, page: Page) {
        if self.verbose {
            tracing::info!("Crawled {}. Found {} valid links", page.url, page.links.len());
        } else {
            tracing::debug!("Crawled {}. Found {} valid links", page.url, page.links.len());
        }
        self.sitemap.record(page);
    }

    fn transition(&mut self, next: WorkerState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal worker transition {} -> {}",
            self.state,
            next
        );
        tracing::trace!("Worker {}: {} -> {}", self.id, self.state, next);
        self.state = next;
    }
}
