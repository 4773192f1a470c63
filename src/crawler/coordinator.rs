//! Crawler coordinator - crawl lifecycle
//!
//! The coordinator owns one crawl from start to finish:
//! - Validating the crawl settings and building the link filter
//! - Seeding the frontier with the normalized start URL
//! - Crawling from the seed on one worker until there is a page for every
//!   worker, so the pool starts with work to share
//! - Spawning a fixed pool of workers over the shared frontier and sitemap
//! - Waiting until every worker has stopped, then returning the sitemap
//!
//! Workers only stop when they see the frontier empty, and only a running
//! worker can add to it. Once every worker has stopped, nothing is left to
//! refill the frontier, so joining all of them is the termination barrier.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::sitemap::{Sitemap, SitemapRecorder};
use crate::crawler::worker::{Worker, WorkerReport};
use crate::url::LinkFilter;
use crate::{ConfigError, CrawlError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main crawler coordinator structure
pub struct Coordinator {
    settings: CrawlerConfig,
    filter: Arc<LinkFilter>,
    fetcher: Arc<dyn PageFetcher>,
}

impl Coordinator {
    /// Creates a coordinator for one crawl
    ///
    /// # Arguments
    ///
    /// * `settings` - Seed URL, worker count, disallowed prefixes, verbosity
    /// * `fetcher` - The page fetcher every worker shares
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to crawl
    /// * `Err(CrawlError)` - Zero workers requested, or the seed URL is unusable
    pub fn new(settings: CrawlerConfig, fetcher: Arc<dyn PageFetcher>) -> Result<Self, CrawlError> {
        if settings.thread_count == 0 {
            return Err(ConfigError::Validation(
                "thread_count must be at least 1".to_string(),
            )
            .into());
        }

        let filter = LinkFilter::new(&settings.seed_url, settings.disallowed_prefixes.clone())?;

        Ok(Self {
            settings,
            filter: Arc::new(filter),
            fetcher,
        })
    }

    /// Creates a coordinator that fetches pages over HTTP
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::new(
            &config.user_agent,
            Duration::from_secs(config.crawler.request_timeout_secs),
        )?;
        Self::new(config.crawler.clone(), Arc::new(fetcher))
    }

    /// The normalized URL the crawl starts from
    pub fn seed_url(&self) -> &str {
        self.filter.seed_url()
    }

    /// Runs the crawl to completion and returns the sitemap
    ///
    /// Pages whose fetch failed are missing from the result; their errors are
    /// only logged. Must be called from within a tokio runtime.
    pub async fn start_crawling(self) -> Sitemap {
        self.crawl().await.sitemap
    }

    /// Runs the crawl to completion and returns the sitemap together with
    /// what each worker did
    pub async fn crawl(self) -> CrawlOutcome {
        let start_time = Instant::now();
        let thread_count = self.settings.thread_count;
        let frontier = Arc::new(Frontier::new());
        let sitemap = Arc::new(SitemapRecorder::new());

        // The seed goes straight in, disallow list or not
        frontier.try_enqueue(self.filter.seed_url());

        tracing::info!(
            "Starting crawl of {} with {} workers",
            self.filter.seed_url(),
            thread_count
        );

        let mut workers: Vec<Worker> = (0..thread_count)
            .map(|id| {
                Worker::new(
                    id,
                    frontier.clone(),
                    sitemap.clone(),
                    self.fetcher.clone(),
                    self.filter.clone(),
                    self.settings.verbose_logging,
                )
            })
            .collect();

        // A worker stops on its first empty take, so the pool only starts
        // once the frontier holds a page for every worker or has drained.
        if let Some(primer) = workers.first_mut() {
            while frontier.pending_len() < thread_count && primer.step().await {}
            tracing::debug!(
                "Frontier primed with {} pages after {} crawled",
                frontier.pending_len(),
                primer.report().pages_crawled
            );
        }

        let handles: Vec<_> = workers
            .into_iter()
            .map(|worker| tokio::spawn(worker.run()))
            .collect();

        // Termination barrier: wait for every worker to stop
        let mut reports = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(report) => reports.push(report),
                Err(e) => tracing::error!("Crawl worker did not finish cleanly: {}", e),
            }
        }

        log_reports(&reports, frontier.seen_len(), start_time.elapsed());

        // Every task has finished, so ours is normally the last reference
        drop(frontier);
        let sitemap = Arc::try_unwrap(sitemap)
            .map(SitemapRecorder::into_sitemap)
            .unwrap_or_else(|shared| shared.snapshot());

        CrawlOutcome { sitemap, reports }
    }
}

/// Result of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub sitemap: Sitemap,

    /// One report per worker that finished cleanly
    pub reports: Vec<WorkerReport>,
}

impl CrawlOutcome {
    /// Number of workers that crawled at least one page
    pub fn active_workers(&self) -> usize {
        self.reports.iter().filter(|r| r.pages_crawled > 0).count()
    }
}

fn log_reports(reports: &[WorkerReport], seen: usize, elapsed: Duration) {
    let crawled: usize = reports.iter().map(|r| r.pages_crawled).sum();
    let failed: usize = reports.iter().map(|r| r.fetch_failures).sum();

    for report in reports {
        tracing::debug!(
            "Worker {}: {} pages crawled, {} failed",
            report.worker_id,
            report.pages_crawled,
            report.fetch_failures
        );
    }

    tracing::info!(
        "Crawl completed: {} pages crawled, {} failed, {} URLs seen in {:?}",
        crawled,
        failed,
        seen,
        elapsed
    );
}

/// Runs a complete crawl over HTTP with the given configuration
///
/// # Example
///
/// ```no_run
/// use site_mapper::config::load_config;
/// use site_mapper::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let sitemap = run_crawl(&config).await?;
/// println!("{} pages", sitemap.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<Sitemap, CrawlError> {
    let coordinator = Coordinator::from_config(config)?;
    Ok(coordinator.start_crawling().await)
}
