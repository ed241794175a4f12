//! Site-Spider main entry point
//!
//! This is the command-line interface: crawl a site, then rank its pages
//! against a query.

use anyhow::Context;
use clap::Parser;
use site_spider::config::{load_config_with_hash, Config};
use site_spider::crawler::Spider;
use site_spider::output::{format_results, print_statistics, results_json};
use site_spider::rank::Ranker;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Spider: crawl one website and rank its pages for a query
///
/// Site-Spider follows links from the seed URL without leaving its host,
/// then scores every page by query term frequency plus the scores of the
/// pages linking to it.
#[derive(Parser, Debug)]
#[command(name = "site-spider")]
#[command(version)]
#[command(about = "Crawl a website and rank its pages for a query", long_about = None)]
struct Cli {
    /// Seed URL; only pages on its host are crawled
    #[arg(value_name = "SEED")]
    seed: String,

    /// Query terms (joined with single spaces)
    #[arg(value_name = "QUERY", required = true)]
    query: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of concurrent crawl workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Stop after collecting this many pages
    #[arg(long)]
    max_pages: Option<usize>,

    /// Do not follow links deeper than this from the seed
    #[arg(long)]
    max_depth: Option<u32>,

    /// Stop crawling after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Number of results to print
    #[arg(short, long, default_value_t = 20)]
    limit: usize,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Print crawl statistics after the results
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of file configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(workers) = self.workers {
            config.crawler.workers = workers;
        }
        if self.max_pages.is_some() {
            config.crawler.max_pages = self.max_pages;
        }
        if self.max_depth.is_some() {
            config.crawler.max_depth = self.max_depth;
        }
        if self.timeout.is_some() {
            config.crawler.timeout_secs = self.timeout;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path).map_err(|e| {
                tracing::error!("Failed to load configuration: {}", e);
                e
            })?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    cli.apply_overrides(&mut config);
    site_spider::config::validate(&config).context("invalid command-line settings")?;

    let spider = Spider::from_config(&config)?;
    let (pages, stats) = match spider.crawl_with_stats(&cli.seed).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e).with_context(|| format!("crawling {}", cli.seed));
        }
    };

    let query = cli.query.join(" ");
    tracing::info!("Ranking {} pages for {:?}", pages.len(), query);
    let ranked = Ranker::new(&query).rank(pages);

    if cli.json {
        println!("{}", results_json(&ranked, cli.limit)?);
    } else {
        print!("{}", format_results(&ranked, cli.limit));
    }

    if cli.stats {
        println!();
        print_statistics(&stats);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_spider=info,warn"),
            1 => EnvFilter::new("site_spider=debug,info"),
            2 => EnvFilter::new("site_spider=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
