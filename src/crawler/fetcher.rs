//! Page fetching
//!
//! This module defines the `PageFetcher` seam workers use to turn a URL into
//! the absolute links found on that page, and its HTTP implementation:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - GET requests with redirect following
//! - Content-Type checking (only HTML is parsed)
//! - Link extraction from the response body

use crate::config::UserAgentConfig;
use crate::crawler::parser::extract_links;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::time::Duration;

/// Maximum number of redirects followed for one request
const MAX_REDIRECTS: usize = 10;

/// Connect timeout for every request
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches a page and returns the absolute links found on it
///
/// Implementations must resolve relative hrefs before returning them and
/// silently skip anchors that are empty or cannot be resolved. An `Err`
/// means the page itself could not be fetched.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_links(&self, url: &str) -> Result<Vec<String>, FetchError>;
}

/// Formats the user agent string
///
/// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `request_timeout` - Upper bound for a whole request, body included
///
/// # Example
///
/// ```no_run
/// use site_mapper::config::UserAgentConfig;
/// use site_mapper::crawler::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig {
///     crawler_name: "SiteMapper".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    request_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(request_timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by a reqwest client and the scraper HTML parser
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new(config: &UserAgentConfig, request_timeout: Duration) -> Result<Self, FetchError> {
        let client = build_http_client(config, request_timeout)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetches `url` and extracts its links
    ///
    /// # Request Flow
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Transport error (DNS, refused, timeout, TLS) | `FetchError::Http` |
    /// | Non-2xx status after redirects | `FetchError::Status` |
    /// | Content-Type not `text/html` | `FetchError::ContentMismatch` |
    /// | Body read fails | `FetchError::Http` |
    /// | Otherwise | links resolved against the final URL |
    async fn fetch_links(&self, url: &str) -> Result<Vec<String>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            return Err(FetchError::ContentMismatch {
                url: url.to_string(),
                content_type,
            });
        }

        // Relative links resolve against where we ended up, not where we started
        let final_url = response.url().clone();

        let body = response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok(extract_links(&body, &final_url))
    }
}
