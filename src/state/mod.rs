//! State module for crawl results
//!
//! # Components
//!
//! - `Page`: one crawled document with its outgoing links and rank fields
//! - `CrawlStats`: counters gathered while a crawl runs

mod crawl_stats;
mod page;

// Re-export main types
pub use crawl_stats::CrawlStats;
pub use page::{Page, PageContent};
