//! Output handler traits and types
//!
//! This module defines the trait interface for sitemap writers and the
//! summary record that accompanies every written sitemap.

use crate::crawler::Sitemap;
use crate::output::stats::SitemapStatistics;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Metadata and statistics for one crawl run
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    /// Normalized seed URL
    pub seed_url: String,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Wall-clock duration of the crawl
    pub duration_seconds: f64,

    /// Size of the worker pool
    pub thread_count: usize,

    /// SHA-256 of the configuration file, if one was used
    pub config_hash: Option<String>,

    pub stats: SitemapStatistics,
}

impl CrawlSummary {
    /// Builds a summary for a finished crawl
    pub fn new(
        seed_url: impl Into<String>,
        thread_count: usize,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        sitemap: &Sitemap,
    ) -> Self {
        let duration_seconds = (finished_at - started_at).num_milliseconds().max(0) as f64 / 1000.0;
        Self {
            seed_url: seed_url.into(),
            started_at,
            finished_at,
            duration_seconds,
            thread_count,
            config_hash: None,
            stats: SitemapStatistics::from_sitemap(sitemap),
        }
    }

    /// Attaches the configuration hash
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// Pages crawled per second, or 0 for an instantaneous crawl
    pub fn pages_per_second(&self) -> f64 {
        if self.duration_seconds <= 0.0 {
            return 0.0;
        }
        self.stats.total_pages as f64 / self.duration_seconds
    }
}

/// Trait for sitemap writers
///
/// A writer renders a sitemap and its run summary into one format.
/// `write` has a default implementation on top of `render`.
pub trait SitemapWriter {
    /// Renders the sitemap to a string
    fn render(&self, sitemap: &Sitemap, summary: &CrawlSummary) -> OutputResult<String>;

    /// File extension conventionally used for this format
    fn extension(&self) -> &'static str;

    /// Renders the sitemap and writes it to `path`, replacing any existing file
    fn write(&self, sitemap: &Sitemap, summary: &CrawlSummary, path: &Path) -> OutputResult<()> {
        let rendered = self.render(sitemap, summary)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, rendered)?;
        Ok(())
    }
}
