use serde::Deserialize;

/// Main configuration structure for Site-Mapper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl invocation parameters
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URL the crawl starts from; also fixes the crawl's domain
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Number of concurrent workers
    #[serde(rename = "thread-count")]
    pub thread_count: usize,

    /// URL prefixes that are never crawled or recorded as links
    #[serde(rename = "disallowed-prefixes", default)]
    pub disallowed_prefixes: Vec<String>,

    /// Log every crawled page at info level instead of debug
    #[serde(rename = "verbose-logging", default)]
    pub verbose_logging: bool,

    /// Per-request timeout in seconds
    #[serde(
        rename = "request-timeout-secs",
        default = "default_request_timeout_secs"
    )]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Where the sitemap file is written
    #[serde(rename = "sitemap-path", default = "default_sitemap_path")]
    pub sitemap_path: String,

    /// Sitemap file format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_sitemap_path() -> String {
    "./sitemap.md".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sitemap_path: default_sitemap_path(),
            format: OutputFormat::default(),
        }
    }
}

/// Sitemap file formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable markdown
    #[default]
    Markdown,
    /// Machine-readable JSON
    Json,
}
