//! JSON sitemap generation

use crate::crawler::{Page, Sitemap};
use crate::output::traits::{CrawlSummary, OutputResult, SitemapWriter};
use serde::Serialize;

/// Writes sitemaps as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

#[derive(Serialize)]
struct JsonSitemap<'a> {
    summary: &'a CrawlSummary,
    pages: Vec<&'a Page>,
}

impl SitemapWriter for JsonWriter {
    fn render(&self, sitemap: &Sitemap, summary: &CrawlSummary) -> OutputResult<String> {
        let document = JsonSitemap {
            summary,
            pages: sitemap.pages().collect(),
        };
        let mut json = serde_json::to_string_pretty(&document)?;
        json.push('\n');
        Ok(json)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
