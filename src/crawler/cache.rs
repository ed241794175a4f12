//! Per-crawl document cache
//!
//! Memoizes parsed documents by canonical URI for the lifetime of one crawl.
//! Concurrent requests for the same URI share a single in-flight fetch.
//! Failures are not stored, so a later caller may try again.

use crate::crawler::fetcher::DocumentFetcher;
use crate::crawler::parser::ParsedDocument;
use crate::FetchError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

type Slot = Arc<OnceCell<Arc<ParsedDocument>>>;

/// Memoizing wrapper around a `DocumentFetcher`
pub struct DocumentCache<F> {
    fetcher: Arc<F>,
    entries: Mutex<HashMap<String, Slot>>,
}

impl<F: DocumentFetcher> DocumentCache<F> {
    /// Creates an empty cache in front of `fetcher`
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the document for `uri`, fetching it on first use
    pub async fn fetch(&self, uri: &str) -> Result<Arc<ParsedDocument>, FetchError> {
        let slot = {
            let mut entries = self.entries.lock().await;
            Arc::clone(entries.entry(uri.to_string()).or_default())
        };

        let document = slot
            .get_or_try_init(|| async { self.fetcher.fetch(uri).await.map(Arc::new) })
            .await?;

        Ok(Arc::clone(document))
    }

    /// Returns true if a document for `uri` has been stored
    #[cfg(test)]
    pub(crate) async fn contains(&self, uri: &str) -> bool {
        let entries = self.entries.lock().await;
        entries
            .get(uri)
            .is_some_and(|slot| slot.initialized())
    }

    /// Number of documents stored
    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|slot| slot.initialized()).count()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
