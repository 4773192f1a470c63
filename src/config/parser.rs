//! Reading configuration files from disk

use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads, parses and validates a Site-Mapper configuration file
///
/// Only `[crawler]` `seed-url`/`thread-count` and the `[user-agent]` table
/// are required; everything else has a default. The whole file is
/// validated before it is returned, so a loaded `Config` is always safe to
/// hand to `Coordinator::from_config`.
///
/// # Example
///
/// ```no_run
/// use site_mapper::config::{load_config, OutputFormat};
/// use std::path::Path;
///
/// // [crawler]
/// // seed-url = "https://example.com"
/// // thread-count = 8
/// // disallowed-prefixes = ["https://example.com/admin"]
/// //
/// // [user-agent]
/// // crawler-name = "SiteMapper"
/// // crawler-version = "0.1"
/// // contact-url = "https://example.com/about"
/// // contact-email = "admin@example.com"
/// let config = load_config(Path::new("site-mapper.toml")).unwrap();
///
/// assert_eq!(config.crawler.thread_count, 8);
/// assert_eq!(config.output.format, OutputFormat::Markdown);
/// assert_eq!(config.output.sitemap_path, "./sitemap.md");
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Hex-encoded SHA-256 of the configuration file's bytes
///
/// Recorded in the sitemap summary so a sitemap can be traced back to the
/// exact configuration that produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let bytes = std::fs::read(path)?;
    Ok(hash_bytes(&bytes))
}

fn hash_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Loads a configuration together with the hash of the file it came from
///
/// The file is read once, so the hash always matches the parsed contents.
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_bytes(content.as_bytes())))
}
