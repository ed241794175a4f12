//! Crawl statistics display

use crate::state::CrawlStats;

/// Formats statistics in the same layout `print_statistics` writes
pub fn format_statistics(stats: &CrawlStats) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Statistics ===\n\n");

    out.push_str("Overview:\n");
    out.push_str(&format!(
        "  Started: {}\n",
        stats.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "  Duration: {:.2}s ({:.2} pages/sec)\n",
        stats.elapsed.as_secs_f64(),
        stats.pages_per_sec()
    ));
    out.push_str(&format!("  Pages crawled: {}\n", stats.pages));
    out.push_str(&format!("  URIs visited: {}\n", stats.visited));
    out.push('\n');

    out.push_str("Links:\n");
    out.push_str(&format!("  Total links found: {}\n", stats.links_seen));
    out.push_str(&format!("  File links: {}\n", stats.file_links));
    out.push_str(&format!(
        "  Cross-host links not followed: {}\n",
        stats.cross_host_skipped
    ));
    out.push('\n');

    if stats.fetch_failures > 0 {
        out.push_str("Error Summary:\n");
        out.push_str(&format!("  Fetch failures: {}\n", stats.fetch_failures));
        out.push('\n');
    }

    if stats.budget_exhausted {
        out.push_str("Crawl stopped early: budget exhausted\n");
    }

    let attempted = stats.pages + stats.fetch_failures;
    let success_rate = if attempted > 0 {
        (stats.pages as f64 / attempted as f64) * 100.0
    } else {
        0.0
    };
    out.push_str(&format!(
        "Success Rate: {:.1}% ({} / {} pages successfully fetched)\n",
        success_rate, stats.pages, attempted
    ));

    out
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    print!("{}", format_statistics(stats));
}
