//! Crawler module for concurrent, domain-scoped crawling
//!
//! This module contains the core crawling logic, including:
//! - The shared frontier (pending queue + seen set)
//! - The sitemap accumulator
//! - Worker tasks and the coordinator that runs them to completion
//! - HTTP fetching and HTML link extraction

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod sitemap;
#[cfg(test)]
mod test_support;
mod worker;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use fetcher::{build_http_client, user_agent_string, HttpFetcher, PageFetcher};
pub use frontier::Frontier;
pub use parser::extract_links;
pub use sitemap::{Page, Sitemap, SitemapRecorder};
pub use worker::{Worker, WorkerReport};

use crate::config::Config;
use crate::CrawlError;

/// Runs a complete crawl
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Seed the frontier with the configured start URL
/// 3. Run the worker pool until the frontier is drained
/// 4. Return the sitemap
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Sitemap)` - Crawl completed; failed pages are simply absent
/// * `Err(CrawlError)` - The crawl could not be started
pub async fn crawl(config: &Config) -> Result<Sitemap, CrawlError> {
    run_crawl(config).await
}
