//! Site-Mapper main entry point
//!
//! This is the command-line interface for the Site-Mapper crawler.

use anyhow::Context;
use clap::Parser;
use site_mapper::config::{load_config_with_hash, validate_crawler_config, Config};
use site_mapper::crawler::Coordinator;
use site_mapper::output::{print_statistics, write_sitemap, CrawlSummary};
use site_mapper::LinkFilter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Mapper: a concurrent, domain-scoped sitemap crawler
///
/// Site-Mapper crawls a website breadth-first from a seed URL, stays on the
/// seed's domain, skips disallowed URL prefixes, and writes a sitemap of
/// every page it reached together with the links found on it.
#[derive(Parser, Debug)]
#[command(name = "site-mapper")]
#[command(version)]
#[command(about = "A concurrent, domain-scoped sitemap crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Override the seed URL
    #[arg(long, value_name = "URL")]
    seed: Option<String>,

    /// Override the number of workers
    #[arg(long, value_name = "N")]
    threads: Option<usize>,

    /// Add a disallowed URL prefix (repeatable)
    #[arg(long, value_name = "PREFIX")]
    disallow: Vec<String>,

    /// Override the sitemap output path
    #[arg(long, value_name = "PATH")]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e).context("could not load configuration");
        }
    };

    apply_overrides(&mut config, &cli);
    validate_crawler_config(&config.crawler).context("invalid command-line override")?;

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_crawl(&config, config_hash, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_mapper=info,warn"),
            1 => EnvFilter::new("site_mapper=debug,info"),
            2 => EnvFilter::new("site_mapper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides on top of the file configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(seed) = &cli.seed {
        config.crawler.seed_url = seed.clone();
    }
    if let Some(threads) = cli.threads {
        config.crawler.thread_count = threads;
    }
    config
        .crawler
        .disallowed_prefixes
        .extend(cli.disallow.iter().cloned());
    if let Some(output) = &cli.output {
        config.output.sitemap_path = output.clone();
    }
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let filter = LinkFilter::new(
        &config.crawler.seed_url,
        config.crawler.disallowed_prefixes.clone(),
    )?;

    println!("=== Site-Mapper Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed URL: {}", config.crawler.seed_url);
    println!("  Normalized seed: {}", filter.seed_url());
    println!("  Domain: {}", filter.seed_domain());
    println!("  Workers: {}", config.crawler.thread_count);
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );
    println!("  Verbose logging: {}", config.crawler.verbose_logging);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Sitemap: {}", config.output.sitemap_path);
    println!("  Format: {:?}", config.output.format);

    println!("\nDisallowed Prefixes ({}):", filter.disallowed().len());
    for prefix in filter.disallowed() {
        println!("  - {}", prefix);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would crawl {} with {} workers",
        filter.seed_url(),
        config.crawler.thread_count
    );

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, config_hash: String, quiet: bool) -> anyhow::Result<()> {
    let coordinator = Coordinator::from_config(config).context("could not start crawl")?;
    let seed_url = coordinator.seed_url().to_string();

    let started_at = chrono::Utc::now();
    let outcome = coordinator.crawl().await;
    let finished_at = chrono::Utc::now();
    tracing::info!(
        "{} of {} workers crawled at least one page",
        outcome.active_workers(),
        config.crawler.thread_count
    );
    let sitemap = outcome.sitemap;

    let summary = CrawlSummary::new(
        seed_url,
        config.crawler.thread_count,
        started_at,
        finished_at,
        &sitemap,
    )
    .with_config_hash(config_hash);

    if let Err(e) = write_sitemap(&sitemap, &summary, &config.output) {
        tracing::error!("Failed to write sitemap: {}", e);
        return Err(e).context("could not write sitemap");
    }

    if !quiet {
        print_statistics(&summary.stats);
        println!(
            "Crawled in {:.2}s ({:.2} pages/second)",
            summary.duration_seconds,
            summary.pages_per_second()
        );
        println!("✓ Sitemap written to: {}", config.output.sitemap_path);
    }

    Ok(())
}
