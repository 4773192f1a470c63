//! HTML parser for extracting links
//!
//! This module turns a fetched HTML document into the list of absolute link
//! URLs found in its `<a href>` anchors.

use scraper::{Html, Selector};
use url::Url;

/// Extracts every followable anchor link from an HTML document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document, resolved against `base_url`
/// - fragment links (`#top`), which resolve to the page itself
///
/// **Exclude (silently):**
/// - Empty hrefs
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - Hrefs that cannot be resolved, or resolve to a non-HTTP(S) URL
///
/// Links are returned in document order, duplicates included.
///
/// # Example
///
/// ```
/// use site_mapper::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(extract_links(html, &base_url), vec!["https://example.com/page"]);
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        // Skip if it has the download attribute
        if element.value().attr("download").is_some() {
            continue;
        }

        if let Some(href) = element.value().attr("href") {
            if let Some(absolute_url) = resolve_link(href, base_url) {
                links.push(absolute_url);
            }
        }
    }

    links
}

/// Href prefixes that never lead to a crawlable page
const SKIPPED_SCHEMES: [&str; 4] = ["javascript:", "mailto:", "tel:", "data:"];

/// Resolves an href against `base_url`
///
/// Returns None for empty hrefs, skipped schemes, unresolvable hrefs, and
/// anything that does not resolve to HTTP(S).
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        return None;
    }

    base_url
        .join(href)
        .ok()
        .filter(|absolute| matches!(absolute.scheme(), "http" | "https"))
        .map(String::from)
}
