//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.
//!
//! Mock paths end in letters: normalization strips trailing non-letters,
//! which would eat the port of a bare `http://127.0.0.1:PORT` URL.

use site_mapper::config::{
    load_config, Config, CrawlerConfig, OutputConfig, OutputFormat, UserAgentConfig,
};
use site_mapper::crawler::{run_crawl, Coordinator, Sitemap};
use site_mapper::output::{write_sitemap, CrawlSummary};
use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling from `seed`
fn create_test_config(seed: &str, threads: usize, disallowed: Vec<String>) -> Config {
    Config {
        crawler: CrawlerConfig {
            seed_url: seed.to_string(),
            thread_count: threads,
            disallowed_prefixes: disallowed,
            verbose_logging: false,
            request_timeout_secs: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig::default(),
    }
}

/// An HTML response wrapping `body`
fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>{}</body></html>", body),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html(body))
        .expect(1)
        .mount(server)
        .await;
}

fn links_of(sitemap: &Sitemap, url: &str) -> Vec<String> {
    sitemap
        .get(url)
        .unwrap_or_else(|| panic!("{} missing from sitemap", url))
        .links
        .clone()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_crawl_single_domain() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/index",
        &format!(
            r#"<a href="{base}/about">About</a>
               <a href="/contact">Contact</a>
               <a href="https://other.example/page">Elsewhere</a>"#
        ),
    )
    .await;
    mount_page(&server, "/about", r#"<a href="/index">Home</a><a href="team">Team</a>"#).await;
    mount_page(&server, "/contact", "<p>No links here</p>").await;
    mount_page(&server, "/team", r#"<a href="/about">Back</a>"#).await;

    let config = create_test_config(&format!("{base}/index"), 3, vec![]);
    let sitemap = run_crawl(&config).await.unwrap();

    assert_eq!(sitemap.len(), 4);
    assert_eq!(
        links_of(&sitemap, &format!("{base}/index")),
        vec![format!("{base}/about"), format!("{base}/contact")]
    );
    assert_eq!(
        links_of(&sitemap, &format!("{base}/about")),
        vec![format!("{base}/index"), format!("{base}/team")]
    );
    assert!(links_of(&sitemap, &format!("{base}/contact")).is_empty());
    assert!(sitemap.urls().all(|u| u.starts_with(&base)));
}

#[tokio::test]
async fn test_trailing_slash_variants_crawled_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/index",
        &format!(r#"<a href="{base}/docs">Docs</a><a href="{base}/docs/">Docs again</a>"#),
    )
    .await;
    mount_page(&server, "/docs", "").await;

    let config = create_test_config(&format!("{base}/index"), 2, vec![]);
    let sitemap = run_crawl(&config).await.unwrap();

    assert_eq!(sitemap.len(), 2);
    assert_eq!(
        links_of(&sitemap, &format!("{base}/index")),
        vec![format!("{base}/docs"), format!("{base}/docs")]
    );
    // expect(1) on every mock is verified when the server drops
}

#[tokio::test]
async fn test_failed_pages_omitted() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/index",
        r#"<a href="/missing">Gone</a><a href="/broken">Broken</a><a href="/image">Image</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/image"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8; 16], "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{base}/index"), 2, vec![]);
    let sitemap = run_crawl(&config).await.unwrap();

    assert_eq!(sitemap.urls().collect::<Vec<_>>(), vec![format!("{base}/index")]);
    // Links to failed pages are still recorded on the page that found them
    assert_eq!(links_of(&sitemap, &format!("{base}/index")).len(), 3);
}

#[tokio::test]
async fn test_disallowed_prefix_never_fetched_or_recorded() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/index",
        r#"<a href="/private/secret">Secret</a><a href="/public">Public</a>"#,
    )
    .await;
    mount_page(&server, "/public", r#"<a href="/private/other">Other</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/private/secret"))
        .respond_with(html(""))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{base}/index"), 2, vec![format!("{base}/private")]);
    let sitemap = run_crawl(&config).await.unwrap();

    assert_eq!(sitemap.len(), 2);
    for page in sitemap.pages() {
        assert!(page.links.iter().all(|l| !l.contains("/private")));
    }
}

#[tokio::test]
async fn test_redirect_followed_relative_links_resolve_against_target() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/index", r#"<a href="/moved">Moved</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{base}/docs/intro").as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/docs/intro"))
        .respond_with(html(r#"<a href="guide">Guide</a>"#))
        .mount(&server)
        .await;
    mount_page(&server, "/docs/guide", "").await;

    let config = create_test_config(&format!("{base}/index"), 1, vec![]);
    let sitemap = run_crawl(&config).await.unwrap();

    // Recorded under the URL that was requested
    assert_eq!(
        links_of(&sitemap, &format!("{base}/moved")),
        vec![format!("{base}/docs/guide")]
    );
    assert!(sitemap.contains(&format!("{base}/docs/guide")));
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty_sitemap() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/index"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{base}/index"), 4, vec![]);
    let coordinator = Coordinator::from_config(&config).unwrap();
    assert_eq!(coordinator.seed_url(), format!("{base}/index"));

    let sitemap = coordinator.start_crawling().await;
    assert!(sitemap.is_empty());
}

#[tokio::test]
async fn test_sends_configured_user_agent() {
    use wiremock::matchers::header;

    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/index"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact; test@example.com)",
        ))
        .respond_with(html(""))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&format!("{base}/index"), 1, vec![]);
    let sitemap = run_crawl(&config).await.unwrap();
    assert_eq!(sitemap.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_config_file_to_written_sitemap() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/index", r#"<a href="/blog">Blog</a>"#).await;
    mount_page(&server, "/blog", r#"<a href="/index">Home</a>"#).await;

    let out_dir = tempfile::tempdir().unwrap();
    let sitemap_path = out_dir.path().join("sitemap.json");

    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    write!(
        config_file,
        r#"
[crawler]
seed-url = "{base}/index"
thread-count = 2

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"
contact-url = "https://example.com/contact"
contact-email = "test@example.com"

[output]
sitemap-path = "{}"
format = "json"
"#,
        sitemap_path.display()
    )
    .unwrap();
    config_file.flush().unwrap();

    let config = load_config(config_file.path()).unwrap();
    assert_eq!(config.output.format, OutputFormat::Json);

    let started_at = chrono::Utc::now();
    let sitemap = run_crawl(&config).await.unwrap();
    let summary = CrawlSummary::new(
        format!("{base}/index"),
        config.crawler.thread_count,
        started_at,
        chrono::Utc::now(),
        &sitemap,
    );
    write_sitemap(&sitemap, &summary, &config.output).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&sitemap_path).unwrap()).unwrap();
    assert_eq!(written["summary"]["stats"]["total_pages"], 2);
    let pages = written["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["url"], format!("{base}/blog"));
    assert_eq!(pages[0]["links"][0], format!("{base}/index"));
}
