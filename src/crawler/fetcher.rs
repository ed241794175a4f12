//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Retry logic for transient failures
//! - Error classification into `FetchError`

use crate::config::FetcherConfig;
use crate::crawler::parser::{parse_document, ParsedDocument};
use crate::FetchError;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Source of parsed documents for the crawl engine
///
/// The crawl engine only ever talks to this trait, so tests can serve a
/// fixture site from memory and the HTTP client stays swappable.
pub trait DocumentFetcher: Send + Sync {
    /// Fetches and parses the document at `uri`
    fn fetch(&self, uri: &str)
        -> impl Future<Output = Result<ParsedDocument, FetchError>> + Send;
}

/// Fetches documents over HTTP with reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    retries: u32,
    retry_delay: Duration,
}

impl HttpFetcher {
    /// Builds a fetcher from configuration
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            retries: config.retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    /// Wraps an existing client; no retries
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            retries: 0,
            retry_delay: Duration::ZERO,
        }
    }
}

impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, uri: &str) -> Result<ParsedDocument, FetchError> {
        let mut attempt = 0;
        loop {
            match fetch_body(&self.client, uri).await {
                Ok(body) => return Ok(parse_document(&body)),
                Err(e) if e.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    tracing::debug!(
                        "Retrying {} after {} (attempt {}/{})",
                        uri,
                        e,
                        attempt,
                        self.retries
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use site_spider::config::FetcherConfig;
/// use site_spider::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs a single GET and returns the body of a successful response
///
/// # Error Mapping
///
/// | Condition | Error |
/// |-----------|-------|
/// | Non-2xx status | `Status` |
/// | Request timeout | `Timeout` |
/// | Connect/DNS/TLS failure | `Network` |
/// | Body could not be read | `Body` |
pub async fn fetch_body(client: &Client, uri: &str) -> Result<String, FetchError> {
    let response = client
        .get(uri)
        .send()
        .await
        .map_err(|e| classify_error(uri, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: uri.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| FetchError::Body {
        url: uri.to_string(),
        message: e.to_string(),
    })
}

fn classify_error(uri: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: uri.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Network {
            url: uri.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        FetchError::Network {
            url: uri.to_string(),
            message: error.to_string(),
        }
    }
}
