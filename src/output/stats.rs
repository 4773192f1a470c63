//! Statistics derived from a finished sitemap
//!
//! This module provides functionality for summarizing a sitemap and
//! displaying the result on stdout.

use crate::crawler::Sitemap;
use serde::Serialize;
use std::collections::HashMap;

/// Number of entries kept in `most_linked`
const TOP_LINKED: usize = 10;

/// Sitemap statistics summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SitemapStatistics {
    /// Number of crawled pages
    pub total_pages: usize,

    /// Number of recorded links, duplicates included
    pub total_links: usize,

    /// Number of distinct link targets
    pub unique_link_targets: usize,

    /// Crawled pages with an empty link list
    pub pages_without_links: usize,

    /// Most referenced link targets with their reference counts
    pub most_linked: Vec<(String, usize)>,
}

impl SitemapStatistics {
    /// Computes statistics for a sitemap
    ///
    /// `most_linked` is ordered by count descending, then URL ascending.
    pub fn from_sitemap(sitemap: &Sitemap) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut pages_without_links = 0;

        for page in sitemap.pages() {
            if page.links.is_empty() {
                pages_without_links += 1;
            }
            for link in &page.links {
                *counts.entry(link.as_str()).or_insert(0) += 1;
            }
        }

        let unique_link_targets = counts.len();
        let mut most_linked: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(url, count)| (url.to_string(), count))
            .collect();
        most_linked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        most_linked.truncate(TOP_LINKED);

        Self {
            total_pages: sitemap.len(),
            total_links: sitemap.total_links(),
            unique_link_targets,
            pages_without_links,
            most_linked,
        }
    }

    /// Average number of links per crawled page
    pub fn average_links_per_page(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        self.total_links as f64 / self.total_pages as f64
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &SitemapStatistics) {
    println!("=== Sitemap Statistics ===\n");

    println!("Overview:");
    println!("  Pages crawled: {}", stats.total_pages);
    println!("  Links recorded: {}", stats.total_links);
    println!("  Unique link targets: {}", stats.unique_link_targets);
    println!("  Pages without links: {}", stats.pages_without_links);
    println!(
        "  Average links per page: {:.1}",
        stats.average_links_per_page()
    );
    println!();

    if !stats.most_linked.is_empty() {
        println!("Most Linked Pages:");
        for (url, count) in &stats.most_linked {
            println!("  {:>5}  {}", count, url);
        }
        println!();
    }
}
