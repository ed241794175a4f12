//! Counters collected during one crawl

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Summary of a finished crawl
#[derive(Debug, Clone, Serialize)]
pub struct CrawlStats {
    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// Wall-clock time the crawl took
    pub elapsed: Duration,

    /// Pages collected (including the seed)
    pub pages: usize,

    /// URIs marked visited, whether fetched, failed or skipped
    pub visited: usize,

    /// Same-host URIs whose fetch failed
    pub fetch_failures: usize,

    /// Links to other hosts that were recorded but not followed
    pub cross_host_skipped: usize,

    /// Usable links seen across all pages
    pub links_seen: usize,

    /// Of those, links classified as files
    pub file_links: usize,

    /// True if a page, depth or time budget cut the crawl short
    pub budget_exhausted: bool,
}

impl CrawlStats {
    /// Starts a fresh set of counters stamped with the current time
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
            pages: 0,
            visited: 0,
            fetch_failures: 0,
            cross_host_skipped: 0,
            links_seen: 0,
            file_links: 0,
            budget_exhausted: false,
        }
    }

    /// Pages collected per second of crawl time
    pub fn pages_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.pages as f64 / secs
        } else {
            0.0
        }
    }
}
