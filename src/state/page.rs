//! Page records produced by the crawl engine and annotated by the ranker

use crate::url::LinkRef;
use serde::Serialize;

/// Text content extracted from a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageContent {
    /// Contents of the `<title>` element, empty if the page has none
    pub title: String,

    /// All text of the document
    pub text: String,
}

/// A crawled page
///
/// Rank fields stay zero until [`crate::rank::rank`] fills them in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Canonical URI of the page
    pub uri: String,

    /// Every usable link found on the page, in document order
    pub links: Vec<LinkRef>,

    /// Title and text of the page
    pub content: PageContent,

    /// Term-frequency score against the query
    pub c_rank: u64,

    /// Sum of the content scores of pages linking here
    pub l_rank: u64,

    /// Combined score used for ordering
    pub rank: f64,
}

impl Page {
    /// Creates an unranked page
    pub fn new(uri: impl Into<String>, links: Vec<LinkRef>, content: PageContent) -> Self {
        Self {
            uri: uri.into(),
            links,
            content,
            c_rank: 0,
            l_rank: 0,
            rank: 0.0,
        }
    }

    /// Returns true if the page links to `uri`
    pub fn links_to(&self, uri: &str) -> bool {
        self.links.iter().any(|link| link.uri == uri)
    }
}
