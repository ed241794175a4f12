//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `DocumentFetcher` trait
//! - A per-crawl document cache
//! - HTML parsing into title, text and raw anchors
//! - The shared frontier and visited set
//! - Worker pool coordination

mod cache;
mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use cache::DocumentCache;
pub use coordinator::{extract_links, CrawlBudget, Spider};
pub use fetcher::{build_http_client, fetch_body, DocumentFetcher, HttpFetcher};
pub use frontier::{Frontier, QueuedLink};
pub use parser::{parse_document, ParsedDocument};

use crate::config::Config;
use crate::state::Page;
use crate::SpiderError;

/// Crawls the seed's host over HTTP with `workers` concurrent workers
///
/// This is the main entry point for a crawl. It will:
/// 1. Fetch the seed and record its page
/// 2. Spawn the worker pool over the seed's links
/// 3. Fetch, extract and enqueue until the frontier is exhausted
///
/// # Arguments
///
/// * `seed` - Absolute http(s) URL to start from
/// * `workers` - Worker pool size
///
/// # Returns
///
/// * `Ok(Vec<Page>)` - Every page collected, in no particular order
/// * `Err(SpiderError)` - The seed was invalid or could not be fetched
///
/// # Example
///
/// ```no_run
/// use site_spider::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pages = crawl("https://blog.example.com", 10).await?;
/// # Ok(())
/// # }
/// ```
pub async fn crawl(seed: &str, workers: usize) -> Result<Vec<Page>, SpiderError> {
    let mut config = Config::default();
    config.crawler.workers = workers;
    crawl_with_config(seed, &config).await
}

/// Crawls with every setting (fetcher, workers, budget) taken from `config`
pub async fn crawl_with_config(seed: &str, config: &Config) -> Result<Vec<Page>, SpiderError> {
    Spider::from_config(config)?.crawl(seed).await
}
