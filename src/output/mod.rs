//! Output module for ranked results and crawl reports
//!
//! This module handles:
//! - Rendering ranked pages as a text table or JSON
//! - Printing crawl statistics

mod results;
pub mod stats;

pub use results::{format_results, results_json, truncate_title};
pub use stats::{format_statistics, print_statistics};
