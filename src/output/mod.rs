//! Output module for writing sitemaps and crawl reports
//!
//! This module handles:
//! - Rendering sitemaps as markdown or JSON
//! - Summarizing a crawl run and its sitemap statistics
//! - Printing statistics to the console

mod json;
mod markdown;
pub mod stats;
mod traits;

pub use json::JsonWriter;
pub use markdown::{format_markdown_sitemap, MarkdownWriter};
pub use stats::{print_statistics, SitemapStatistics};
pub use traits::{CrawlSummary, OutputError, OutputResult, SitemapWriter};

use crate::config::{OutputConfig, OutputFormat};
use crate::crawler::Sitemap;
use std::path::Path;

/// Returns the writer for a sitemap format
pub fn writer_for(format: OutputFormat) -> Box<dyn SitemapWriter> {
    match format {
        OutputFormat::Markdown => Box::new(MarkdownWriter),
        OutputFormat::Json => Box::new(JsonWriter),
    }
}

/// Writes a sitemap according to the output configuration
///
/// # Arguments
///
/// * `sitemap` - The completed sitemap
/// * `summary` - Metadata and statistics for the run
/// * `config` - Destination path and format
///
/// # Returns
///
/// * `Ok(())` - The file was written
/// * `Err(OutputError)` - Rendering or writing failed
pub fn write_sitemap(
    sitemap: &Sitemap,
    summary: &CrawlSummary,
    config: &OutputConfig,
) -> OutputResult<()> {
    let path = Path::new(&config.sitemap_path);
    let writer = writer_for(config.format);

    if path.extension().and_then(|e| e.to_str()) != Some(writer.extension()) {
        tracing::warn!(
            "Sitemap path {} does not end in .{}",
            path.display(),
            writer.extension()
        );
    }

    writer.write(sitemap, summary, path)?;
    tracing::info!("Sitemap written to {}", path.display());
    Ok(())
}
