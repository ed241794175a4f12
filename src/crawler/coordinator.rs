//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives one crawl from a seed URL:
//! - Fetching the seed synchronously and building its page
//! - Spawning a fixed pool of workers over the shared frontier
//! - Fetch, extract links, enqueue, record page, per worker
//! - Enforcing the optional page, depth and time budget

use crate::config::{Config, DEFAULT_WORKERS};
use crate::crawler::cache::DocumentCache;
use crate::crawler::fetcher::{DocumentFetcher, HttpFetcher};
use crate::crawler::frontier::{Frontier, QueuedLink};
use crate::crawler::parser::ParsedDocument;
use crate::state::{CrawlStats, Page, PageContent};
use crate::url::{canonicalize, host_key, is_same_host, resolve_location, LinkRef};
use crate::SpiderError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use url::Url;

/// Optional limits on a crawl
///
/// All limits are off by default, which crawls everything reachable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlBudget {
    /// Stop once this many pages have been collected (the seed counts)
    pub max_pages: Option<usize>,

    /// Do not enqueue links deeper than this (the seed is depth 0)
    pub max_depth: Option<u32>,

    /// Return whatever was collected once this much time has passed
    pub timeout: Option<Duration>,
}

impl CrawlBudget {
    /// A budget with no limits
    pub fn unlimited() -> Self {
        Self::default()
    }

    fn allows_depth(&self, depth: u32) -> bool {
        self.max_depth.map_or(true, |max| depth <= max)
    }
}

/// Crawls a single host from a seed URL
///
/// # Example
///
/// ```no_run
/// use site_spider::crawler::{HttpFetcher, Spider};
/// use site_spider::config::FetcherConfig;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpFetcher::new(&FetcherConfig::default())?;
/// let spider = Spider::new(fetcher).with_workers(4);
/// let pages = spider.crawl("https://blog.example.com").await?;
/// println!("Crawled {} pages", pages.len());
/// # Ok(())
/// # }
/// ```
pub struct Spider<F> {
    fetcher: Arc<F>,
    workers: usize,
    budget: CrawlBudget,
}

impl Spider<HttpFetcher> {
    /// Builds an HTTP spider from configuration
    pub fn from_config(config: &Config) -> Result<Self, SpiderError> {
        let fetcher = HttpFetcher::new(&config.fetcher)?;
        Ok(Self::new(fetcher)
            .with_workers(config.crawler.workers)
            .with_budget(config.crawler.budget()))
    }
}

impl<F: DocumentFetcher + 'static> Spider<F> {
    /// Creates a spider with the default worker count and no budget
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            workers: DEFAULT_WORKERS,
            budget: CrawlBudget::default(),
        }
    }

    /// Sets the worker pool size (at least one)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_budget(mut self, budget: CrawlBudget) -> Self {
        self.budget = budget;
        self
    }

    /// The fetcher every crawl of this spider goes through
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Crawls from `seed` and returns every page collected
    ///
    /// Page order varies between runs; the set of pages does not.
    pub async fn crawl(&self, seed: &str) -> Result<Vec<Page>, SpiderError> {
        self.crawl_with_stats(seed).await.map(|(pages, _)| pages)
    }

    /// Crawls from `seed`, also returning crawl statistics
    ///
    /// # Returns
    ///
    /// * `Ok((pages, stats))` - Crawl finished or ran out of budget
    /// * `Err(SpiderError::InvalidSeed)` - Seed is not a crawlable URL
    /// * `Err(SpiderError::SeedFetch)` - Seed could not be fetched
    pub async fn crawl_with_stats(
        &self,
        seed: &str,
    ) -> Result<(Vec<Page>, CrawlStats), SpiderError> {
        let started = Instant::now();

        let seed_link = canonicalize(seed).ok_or_else(|| SpiderError::InvalidSeed {
            url: seed.to_string(),
            reason: "must be an absolute http(s) URL without query or fragment".to_string(),
        })?;
        // Relative links on the seed resolve against the seed as given
        let seed_url = Url::parse(seed)?;
        let seed_host = host_key(&seed_url).ok_or_else(|| SpiderError::InvalidSeed {
            url: seed.to_string(),
            reason: "missing host".to_string(),
        })?;

        tracing::info!(
            "Starting crawl of {} with {} workers",
            seed_link.uri,
            self.workers
        );

        // A fresh cache per crawl keeps documents from leaking between seeds
        let ctx = Arc::new(CrawlContext {
            cache: DocumentCache::new(Arc::clone(&self.fetcher)),
            frontier: Frontier::new(),
            pages: Mutex::new(Vec::new()),
            stats: Mutex::new(CrawlStats::start()),
            seed_host,
            budget: self.budget,
            budget_hit: AtomicBool::new(false),
            started,
        });

        ctx.crawl_seed(&seed_link.uri, &seed_url).await?;

        let mut workers = JoinSet::new();
        for id in 0..self.workers {
            workers.spawn(run_worker(id, Arc::clone(&ctx)));
        }

        match self.budget.timeout {
            Some(limit) => {
                let remaining = limit.saturating_sub(started.elapsed());
                if tokio::time::timeout(remaining, join_workers(&mut workers))
                    .await
                    .is_err()
                {
                    tracing::info!("Crawl timeout of {:?} reached, stopping", limit);
                    ctx.budget_hit.store(true, Ordering::SeqCst);
                    ctx.frontier.close().await;
                    workers.abort_all();
                    join_workers(&mut workers).await;
                }
            }
            None => join_workers(&mut workers).await,
        }

        tracing::debug!("{} documents cached", ctx.cache.len().await);

        let pages = std::mem::take(&mut *ctx.pages.lock().await);
        let mut stats = ctx.stats.lock().await.clone();
        stats.pages = pages.len();
        stats.visited = ctx.frontier.visited_count().await;
        stats.elapsed = started.elapsed();
        stats.budget_exhausted = ctx.budget_hit.load(Ordering::SeqCst);

        tracing::info!(
            "Crawl completed: {} pages crawled in {:?}",
            stats.pages,
            stats.elapsed
        );

        Ok((pages, stats))
    }
}

/// State shared by every worker of one crawl
struct CrawlContext<F> {
    cache: DocumentCache<F>,
    frontier: Frontier,
    pages: Mutex<Vec<Page>>,
    stats: Mutex<CrawlStats>,
    seed_host: String,
    budget: CrawlBudget,
    budget_hit: AtomicBool,
    started: Instant,
}

impl<F: DocumentFetcher> CrawlContext<F> {
    /// Fetches the seed; failure here is fatal for the crawl
    async fn crawl_seed(&self, uri: &str, base: &Url) -> Result<(), SpiderError> {
        let document = self
            .cache
            .fetch(uri)
            .await
            .map_err(SpiderError::SeedFetch)?;

        self.frontier.mark_visited(uri).await;

        let resolved = resolve_links(&document, base);
        self.count_links(&resolved).await;
        self.enqueue_links(&resolved, 1).await;
        self.record_page(build_page(uri, resolved, &document)).await;

        Ok(())
    }

    /// Handles one link taken from the frontier
    async fn process(&self, queued: &QueuedLink) {
        let uri = queued.link.uri.as_str();
        tracing::debug!("Processing URL: {}", uri);

        if !is_same_host(uri, &self.seed_host) {
            tracing::debug!("Not following cross-host link {}", uri);
            self.stats.lock().await.cross_host_skipped += 1;
            return;
        }

        let document = match self.cache.fetch(uri).await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", uri, e);
                self.stats.lock().await.fetch_failures += 1;
                return;
            }
        };

        let resolved = resolve_links(&document, &queued.location);
        self.count_links(&resolved).await;
        self.enqueue_links(&resolved, queued.depth + 1).await;
        self.record_page(build_page(uri, resolved, &document)).await;
    }

    /// Queues every non-file link at `depth`, if the depth budget allows
    ///
    /// Links cut off by the depth budget only count as a budget hit if they
    /// have not been visited already.
    async fn enqueue_links(&self, resolved: &[(LinkRef, Url)], depth: u32) {
        let followable = resolved.iter().filter(|(link, _)| !link.is_file);

        if !self.budget.allows_depth(depth) {
            let uris = followable.map(|(link, _)| link.uri.as_str());
            if self.frontier.has_unvisited(uris).await {
                self.budget_hit.store(true, Ordering::SeqCst);
            }
            return;
        }

        let items: Vec<QueuedLink> = followable
            .map(|(link, location)| QueuedLink {
                link: link.clone(),
                location: location.clone(),
                depth,
            })
            .collect();
        self.frontier.push_all(items).await;
    }

    /// Appends a page to the result set, closing the frontier when the page budget fills
    async fn record_page(&self, page: Page) {
        let mut pages = self.pages.lock().await;

        if let Some(max) = self.budget.max_pages {
            if pages.len() >= max {
                tracing::debug!("Page budget full, discarding {}", page.uri);
                return;
            }
        }

        pages.push(page);
        let count = pages.len();

        if count % 10 == 0 {
            let pending = self.frontier.pending().await;
            let rate = count as f64 / self.started.elapsed().as_secs_f64().max(f64::EPSILON);
            tracing::info!(
                "Progress: {} pages crawled, {} in frontier, {:.2} pages/sec",
                count,
                pending,
                rate
            );
        }

        if self.budget.max_pages.is_some_and(|max| count >= max) {
            drop(pages);
            tracing::info!("Page budget of {} reached, stopping", count);
            self.budget_hit.store(true, Ordering::SeqCst);
            self.frontier.close().await;
        }
    }

    async fn count_links(&self, resolved: &[(LinkRef, Url)]) {
        let mut stats = self.stats.lock().await;
        stats.links_seen += resolved.len();
        stats.file_links += resolved.iter().filter(|(link, _)| link.is_file).count();
    }
}

async fn run_worker<F: DocumentFetcher>(id: usize, ctx: Arc<CrawlContext<F>>) {
    while let Some(queued) = ctx.frontier.next().await {
        ctx.process(&queued).await;
        ctx.frontier.complete().await;
    }
    tracing::debug!("Worker {} finished", id);
}

async fn join_workers(workers: &mut JoinSet<()>) {
    while let Some(result) = workers.join_next().await {
        if let Err(e) = result {
            if e.is_panic() {
                tracing::warn!("Crawl worker panicked: {}", e);
            }
        }
    }
}

/// Normalizes every anchor of a document against `base`, dropping unusable ones
///
/// `base` is the location the document was reached at, trailing slash
/// included, not its canonical URI.
pub fn extract_links(document: &ParsedDocument, base: &Url) -> Vec<LinkRef> {
    resolve_links(document, base)
        .into_iter()
        .map(|(link, _)| link)
        .collect()
}

fn resolve_links(document: &ParsedDocument, base: &Url) -> Vec<(LinkRef, Url)> {
    document
        .raw_links
        .iter()
        .filter_map(|href| {
            let resolved = resolve_location(href, base);
            if resolved.is_none() {
                tracing::trace!("Dropping unusable link {:?} on {}", href, base);
            }
            resolved
        })
        .collect()
}

fn build_page(uri: &str, resolved: Vec<(LinkRef, Url)>, document: &ParsedDocument) -> Page {
    Page::new(
        uri,
        resolved.into_iter().map(|(link, _)| link).collect(),
        PageContent {
            title: document.title.clone(),
            text: document.text.clone(),
        },
    )
}
