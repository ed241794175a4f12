//! Query ranking for crawled pages
//!
//! Ranking runs three strictly ordered passes:
//!
//! 1. **Content**: each page's `c_rank` is its title-weighted term frequency
//! 2. **Link propagation**: every page adds its `c_rank` to the `l_rank` of
//!    each page it links to, once per link, using pass-1 values only
//! 3. **Combine**: `rank = (c_rank * l_rank + l_rank) / 2`, then a stable
//!    descending sort
//!
//! The propagation is a single pass, not an iterated fixed point.

mod scoring;

pub use scoring::{combine, content_score, count_occurrences, query_terms};

use crate::state::Page;
use std::collections::HashMap;

/// Ranks pages against one query
#[derive(Debug, Clone)]
pub struct Ranker {
    terms: Vec<String>,
}

impl Ranker {
    pub fn new(query: &str) -> Self {
        Self {
            terms: query_terms(query),
        }
    }

    /// The lower-cased query terms
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Sets `c_rank` from the page content and resets `l_rank`
    pub fn content_rank(&self, page: &mut Page) {
        page.c_rank = content_score(&self.terms, &page.content.title, &page.content.text);
        page.l_rank = 0;
    }

    /// Runs all three passes and returns the pages sorted by rank, highest first
    pub fn rank(&self, mut pages: Vec<Page>) -> Vec<Page> {
        for page in pages.iter_mut() {
            self.content_rank(page);
        }

        propagate_link_rank(&mut pages);

        for page in pages.iter_mut() {
            page.rank = combine(page.c_rank, page.l_rank);
        }

        sort_by_rank(&mut pages);
        pages
    }
}

/// Ranks `pages` against `query`
///
/// # Example
///
/// ```
/// use site_spider::{rank, LinkRef, Page, PageContent};
///
/// let a = Page::new(
///     "https://x.com",
///     vec![LinkRef::page("https://x.com/b")],
///     PageContent { title: "Rust".into(), text: "rust rust".into() },
/// );
/// let b = Page::new("https://x.com/b", vec![], PageContent::default());
///
/// let ranked = rank(vec![a, b], "rust");
/// assert_eq!(ranked[0].uri, "https://x.com/b");
/// assert_eq!(ranked[0].l_rank, 4);
/// ```
pub fn rank(pages: Vec<Page>, query: &str) -> Vec<Page> {
    Ranker::new(query).rank(pages)
}

/// Adds each page's `c_rank` to the `l_rank` of every page it links to
///
/// Targets match by exact URI. Gains are computed from the `c_rank` values
/// before any page is updated, so the order of pages does not matter.
pub fn propagate_link_rank(pages: &mut [Page]) {
    let gains = {
        let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, page) in pages.iter().enumerate() {
            index.entry(page.uri.as_str()).or_default().push(i);
        }

        let mut gains = vec![0u64; pages.len()];
        for page in pages.iter() {
            for link in &page.links {
                if let Some(targets) = index.get(link.uri.as_str()) {
                    for &target in targets {
                        gains[target] += page.c_rank;
                    }
                }
            }
        }
        gains
    };

    for (page, gain) in pages.iter_mut().zip(gains) {
        page.l_rank += gain;
    }
}

/// Stable sort by `rank`, highest first
pub fn sort_by_rank(pages: &mut [Page]) {
    pages.sort_by(|a, b| b.rank.total_cmp(&a.rank));
}
