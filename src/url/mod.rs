//! URL handling module for Site-Mapper
//!
//! This module provides URL normalization, domain extraction, disallow-prefix
//! matching, and the combined link filter that decides which discovered
//! links are eligible for the frontier.

mod domain;
mod filter;
mod normalize;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use domain::{domain_of, extract_domain, is_same_domain};
pub use filter::is_allowed;
pub use normalize::normalize_url;

/// Decides which discovered links may enter the frontier
///
/// Scope is anchored to the seed URL: a link is eligible only if it shares
/// the seed's host, no matter which page it was found on.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    seed_url: String,
    seed_domain: String,
    disallowed: Vec<String>,
}

impl LinkFilter {
    /// Creates a filter for a crawl starting at `seed_url`
    ///
    /// The seed is normalized first. Fails if the normalized seed is empty,
    /// cannot be parsed, is not HTTP(S), or has no host.
    ///
    /// # Examples
    ///
    /// ```
    /// use site_mapper::url::LinkFilter;
    ///
    /// let filter = LinkFilter::new("https://example.com/", vec![]).unwrap();
    /// assert_eq!(filter.seed_url(), "https://example.com");
    /// assert_eq!(filter.accept("https://example.com/a/"), Some("https://example.com/a".to_string()));
    /// assert_eq!(filter.accept("https://other.com/a"), None);
    /// ```
    pub fn new(seed_url: &str, disallowed: Vec<String>) -> UrlResult<Self> {
        let normalized = normalize_url(seed_url.trim());
        if normalized.is_empty() {
            return Err(UrlError::Degenerate(seed_url.to_string()));
        }

        let parsed = Url::parse(normalized).map_err(|e| UrlError::Parse(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(UrlError::InvalidScheme(format!(
                "Only HTTP and HTTPS schemes are supported, got: {}",
                parsed.scheme()
            )));
        }
        let seed_domain = extract_domain(&parsed).ok_or(UrlError::MissingDomain)?;

        Ok(Self {
            seed_url: normalized.to_string(),
            seed_domain,
            disallowed,
        })
    }

    /// The normalized seed URL
    pub fn seed_url(&self) -> &str {
        &self.seed_url
    }

    /// The lowercase host every eligible link must share
    pub fn seed_domain(&self) -> &str {
        &self.seed_domain
    }

    /// The disallowed URL prefixes
    pub fn disallowed(&self) -> &[String] {
        &self.disallowed
    }

    /// Applies the filter chain to a raw discovered link
    ///
    /// Returns the normalized link if it is non-empty, allowed, and on the
    /// seed's domain; None otherwise.
    pub fn accept(&self, raw: &str) -> Option<String> {
        if raw.is_empty() {
            return None;
        }

        let normalized = normalize_url(raw);
        if normalized.is_empty() {
            tracing::trace!("Discarding degenerate link {:?}", raw);
            return None;
        }

        if !is_allowed(normalized, &self.disallowed) {
            tracing::trace!("Link {} is disallowed", normalized);
            return None;
        }

        if domain_of(normalized).as_deref() != Some(self.seed_domain.as_str()) {
            return None;
        }

        Some(normalized.to_string())
    }
}
