//! Site-Spider: a single-host crawler with query ranking
//!
//! This crate crawls a website from a seed URL, staying on the seed's host,
//! and ranks the collected pages against a free-text query using a content
//! score plus a single link-propagation pass.

pub mod config;
pub mod crawler;
pub mod output;
pub mod rank;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Spider operations
#[derive(Debug, Error)]
pub enum SpiderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL {url}: {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("Seed could not be fetched: {0}")]
    SeedFetch(#[source] FetchError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to fetch a single document
///
/// Cloneable so a single in-flight request can hand its outcome to every
/// caller waiting on the same URI.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    /// The URI the failed request was made for
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. }
            | Self::Timeout { url }
            | Self::Network { url, .. }
            | Self::Body { url, .. } => url,
        }
    }

    /// Returns true for failures worth another attempt (5xx, timeouts)
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status >= 500,
            Self::Timeout { .. } => true,
            Self::Network { .. } | Self::Body { .. } => false,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Site-Spider operations
pub type Result<T> = std::result::Result<T, SpiderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlBudget, Spider};
pub use rank::rank;
pub use state::{CrawlStats, Page, PageContent};
pub use crate::url::{normalize, LinkRef};
