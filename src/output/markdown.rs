//! Markdown sitemap generation
//!
//! This module renders a sitemap as a human-readable markdown document:
//! run information, overall statistics, and one section per crawled page
//! listing its links.

use crate::crawler::Sitemap;
use crate::output::traits::{CrawlSummary, OutputResult, SitemapWriter};

/// Writes sitemaps as markdown
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownWriter;

impl SitemapWriter for MarkdownWriter {
    fn render(&self, sitemap: &Sitemap, summary: &CrawlSummary) -> OutputResult<String> {
        Ok(format_markdown_sitemap(sitemap, summary))
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

/// Formats a sitemap and its run summary as markdown
///
/// # Arguments
///
/// * `sitemap` - The completed sitemap
/// * `summary` - Metadata and statistics for the run
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_sitemap(sitemap: &Sitemap, summary: &CrawlSummary) -> String {
    let mut md = String::new();

    // Title
    md.push_str(&format!("# Sitemap for {}\n\n", summary.seed_url));

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed URL**: {}\n", summary.seed_url));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", summary.finished_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        summary.duration_seconds
    ));
    md.push_str(&format!(
        "- **Throughput**: {:.2} pages/second\n",
        summary.pages_per_second()
    ));
    md.push_str(&format!("- **Workers**: {}\n", summary.thread_count));
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Overall statistics
    let stats = &summary.stats;
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Pages Crawled**: {}\n", stats.total_pages));
    md.push_str(&format!("- **Links Recorded**: {}\n", stats.total_links));
    md.push_str(&format!(
        "- **Unique Link Targets**: {}\n",
        stats.unique_link_targets
    ));
    md.push_str(&format!(
        "- **Pages Without Links**: {}\n\n",
        stats.pages_without_links
    ));

    if !stats.most_linked.is_empty() {
        md.push_str("## Most Linked Pages\n\n");
        md.push_str("| URL | References |\n");
        md.push_str("|-----|------------|\n");
        for (url, count) in &stats.most_linked {
            md.push_str(&format!("| {} | {} |\n", url, count));
        }
        md.push('\n');
    }

    // One section per page
    md.push_str("## Pages\n\n");
    if sitemap.is_empty() {
        md.push_str("No pages were crawled.\n");
    }
    for page in sitemap.pages() {
        md.push_str(&format!("### {}\n\n", page.url));
        if page.links.is_empty() {
            md.push_str("_No links_\n\n");
            continue;
        }
        for link in &page.links {
            md.push_str(&format!("- {}\n", link));
        }
        md.push('\n');
    }

    md
}
