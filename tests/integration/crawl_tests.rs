//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the real
//! HTTP fetcher through full crawl and rank cycles.

use site_spider::config::{Config, FetcherConfig};
use site_spider::crawler::{CrawlBudget, HttpFetcher, Spider};
use site_spider::{rank, FetchError, SpiderError};
use std::collections::BTreeSet;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, body
        ))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn http_spider(workers: usize) -> Spider<HttpFetcher> {
    let mut config = Config::default();
    config.crawler.workers = workers;
    Spider::from_config(&config).expect("Failed to build spider")
}

fn uris(pages: &[site_spider::Page]) -> BTreeSet<String> {
    pages.iter().map(|page| page.uri.clone()).collect()
}

/// Serves a small site:
///
/// ```text
/// /       -> /page1, /page2/, /guide.pdf, /search?q=x, other host
/// /page1  -> /, /page2
/// /page2  -> /page1, /missing
/// /missing   404
/// ```
async fn mount_site(server: &MockServer, other_host: &str) {
    mount_page(
        server,
        "/",
        html(
            "Home",
            &format!(
                r#"<p>Welcome to the rust garden</p>
                <a href="/page1">Page 1</a>
                <a href="/page2/">Page 2</a>
                <a href="/guide.pdf">Guide</a>
                <a href="/search?q=x">Search</a>
                <a href="{}/elsewhere">Elsewhere</a>"#,
                other_host
            ),
        ),
    )
    .await;

    mount_page(
        server,
        "/page1",
        html(
            "Rust Tips",
            r#"<p>rust rust</p><a href="/">Home</a><a href="page2">Two</a>"#,
        ),
    )
    .await;

    mount_page(
        server,
        "/page2",
        html(
            "Gardening",
            r#"<p>soil and rust</p><a href="/page1">One</a><a href="/missing">Gone</a>"#,
        ),
    )
    .await;

    mount_page(server, "/missing", ResponseTemplate::new(404)).await;
}

#[tokio::test]
async fn test_full_crawl_single_host() {
    let site = MockServer::start().await;
    let other = MockServer::start().await;

    // The other host must never be contacted
    Mock::given(method("GET"))
        .respond_with(html("Other", ""))
        .expect(0)
        .mount(&other)
        .await;

    mount_site(&site, &other.uri()).await;

    let base = site.uri();
    let (pages, stats) = http_spider(4)
        .crawl_with_stats(&format!("{}/", base))
        .await
        .expect("Crawl failed");

    assert_eq!(
        uris(&pages),
        BTreeSet::from([
            base.clone(),
            format!("{}/page1", base),
            format!("{}/page2", base),
        ])
    );

    let home = pages.iter().find(|p| p.uri == base).unwrap();
    assert_eq!(home.content.title, "Home");
    assert!(home.content.text.contains("rust garden"));
    // The query link is dropped; the file and cross-host links are kept
    assert_eq!(home.links.len(), 4);
    assert!(home.links_to(&format!("{}/guide.pdf", base)));
    assert!(home.links_to(&format!("{}/elsewhere", other.uri())));
    assert!(home.links.iter().any(|link| link.is_file));

    assert_eq!(stats.fetch_failures, 1);
    assert_eq!(stats.cross_host_skipped, 1);
    assert!(!stats.budget_exhausted);
}

#[tokio::test]
async fn test_crawl_then_rank() {
    let site = MockServer::start().await;
    let other = MockServer::start().await;
    mount_site(&site, &other.uri()).await;

    let base = site.uri();
    let pages = http_spider(10).crawl(&base).await.expect("Crawl failed");
    let ranked = rank(pages, "rust");

    // Page text includes the title text.
    // home:  c = 1                          l = page1(5)            -> (5 + 5) / 2 = 5
    // page1: c = title 2 + text 3 = 5       l = home(1) + page2(1)  -> (10 + 2) / 2 = 6
    // page2: c = 1                          l = home(1) + page1(5)  -> (6 + 6) / 2 = 6
    let score = |uri: String| {
        let page = ranked.iter().find(|p| p.uri == uri).unwrap();
        (page.c_rank, page.l_rank, page.rank)
    };
    assert_eq!(score(base.clone()), (1, 5, 5.0));
    assert_eq!(score(format!("{}/page1", base)), (5, 2, 6.0));
    assert_eq!(score(format!("{}/page2", base)), (1, 6, 6.0));

    assert_eq!(ranked.last().unwrap().uri, base);
    assert!(ranked.windows(2).all(|w| w[0].rank >= w[1].rank));
}

#[tokio::test]
async fn test_directory_pages_resolve_relative_links() {
    let site = MockServer::start().await;

    mount_page(
        &site,
        "/docs",
        html("Docs", r#"<a href="intro">Intro</a><a href="guide/">Guide</a>"#),
    )
    .await;
    mount_page(&site, "/docs/intro", html("Intro", "")).await;
    mount_page(
        &site,
        "/docs/guide",
        html("Guide", r#"<a href="setup">Setup</a>"#),
    )
    .await;
    mount_page(&site, "/docs/guide/setup", html("Setup", "")).await;

    // Resolving against the slash-stripped URI would land here
    for route in ["/intro", "/guide", "/docs/setup"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html("Wrong", ""))
            .expect(0)
            .mount(&site)
            .await;
    }

    let base = site.uri();
    let pages = http_spider(4)
        .crawl(&format!("{}/docs/", base))
        .await
        .expect("Crawl failed");

    assert_eq!(
        uris(&pages),
        BTreeSet::from([
            format!("{}/docs", base),
            format!("{}/docs/intro", base),
            format!("{}/docs/guide", base),
            format!("{}/docs/guide/setup", base),
        ])
    );
}

#[tokio::test]
async fn test_worker_counts_agree() {
    let site = MockServer::start().await;

    for route in ["/", "/a", "/b", "/c"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html(
                route,
                r#"<a href="/a">a</a><a href="/b">b</a><a href="/c">c</a>"#,
            ))
            .mount(&site)
            .await;
    }

    let one = http_spider(1).crawl(&site.uri()).await.unwrap();
    let ten = http_spider(10).crawl(&site.uri()).await.unwrap();

    assert_eq!(one.len(), 4);
    assert_eq!(uris(&one), uris(&ten));
}

#[tokio::test]
async fn test_seed_failure_is_fatal() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;

    let err = http_spider(2).crawl(&site.uri()).await.unwrap_err();

    match err {
        SpiderError::SeedFetch(FetchError::Status { status, url }) => {
            assert_eq!(status, 404);
            assert_eq!(url, site.uri());
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_transient_errors_are_retried() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&site)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("Recovered", ""))
        .mount(&site)
        .await;

    let config = FetcherConfig {
        retries: 2,
        retry_delay_ms: 10,
        ..FetcherConfig::default()
    };
    let spider = Spider::new(HttpFetcher::new(&config).unwrap());

    let pages = spider.crawl(&site.uri()).await.expect("Crawl failed");
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].content.title, "Recovered");
}

#[tokio::test]
async fn test_page_budget_over_http() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(
            "Any",
            r#"<a href="/1">1</a><a href="/2">2</a><a href="/3">3</a><a href="/4">4</a>"#,
        ))
        .mount(&site)
        .await;

    let spider = Spider::new(HttpFetcher::with_client(reqwest::Client::new()))
        .with_workers(2)
        .with_budget(CrawlBudget {
            max_pages: Some(3),
            ..CrawlBudget::default()
        });

    let (pages, stats) = spider.crawl_with_stats(&site.uri()).await.unwrap();

    assert_eq!(pages.len(), 3);
    assert!(stats.budget_exhausted);
}
