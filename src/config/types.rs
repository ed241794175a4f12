use crate::crawler::CrawlBudget;
use serde::Deserialize;
use std::time::Duration;

/// Worker pool size used when nothing else is configured
pub const DEFAULT_WORKERS: usize = 10;

/// Main configuration structure for Site-Spider
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Number of concurrent crawl workers
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Stop once this many pages have been collected
    #[serde(default)]
    pub max_pages: Option<usize>,

    /// Do not follow links deeper than this (the seed is depth 0)
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Wall-clock budget for the whole crawl, in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl CrawlerConfig {
    /// Builds the crawl budget described by this configuration
    pub fn budget(&self) -> CrawlBudget {
        CrawlBudget {
            max_pages: self.max_pages,
            max_depth: self.max_depth,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            max_pages: None,
            max_depth: None,
            timeout_secs: None,
        }
    }
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FetcherConfig {
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Total per-request timeout, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection timeout, in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Extra attempts for server errors and timeouts
    #[serde(default)]
    pub retries: u32,

    /// Pause between attempts, in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            retries: 0,
            retry_delay_ms: default_retry_delay(),
        }
    }
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_user_agent() -> String {
    format!("site-spider/{}", env!("CARGO_PKG_VERSION"))
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_retry_delay() -> u64 {
    500
}
