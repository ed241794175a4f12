//! Shared crawl frontier
//!
//! The frontier owns the pending queue, the visited set and the count of
//! links currently being processed. One lock guards all three so that
//! "dequeue, check visited, mark visited" is a single atomic step.
//!
//! # Termination
//!
//! An empty queue alone does not end the crawl: a worker still processing a
//! page may enqueue more links. `next` only returns `None` once the queue is
//! empty *and* nothing is in flight, or after `close` was called. Idle workers
//! park on a `Notify` and re-check whenever work is pushed or completed.

use crate::url::LinkRef;
use std::collections::{HashSet, VecDeque};
use tokio::sync::{Mutex, Notify};
use url::Url;

/// A link waiting to be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedLink {
    /// The link to process
    pub link: LinkRef,

    /// Where the link pointed before canonicalization; relative links on
    /// the fetched page resolve against this
    pub location: Url,

    /// Link distance from the seed (the seed's own links are depth 1)
    pub depth: u32,
}

#[derive(Debug, Default)]
struct FrontierState {
    queue: VecDeque<QueuedLink>,
    visited: HashSet<String>,
    in_flight: usize,
    closed: bool,
}

/// Pending links plus the visited set, shared by all workers
#[derive(Debug, Default)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    notify: Notify,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `uri` visited without queuing it
    ///
    /// Returns false if it was already visited.
    pub async fn mark_visited(&self, uri: &str) -> bool {
        let mut state = self.state.lock().await;
        state.visited.insert(uri.to_string())
    }

    /// Queues links that have not been visited yet
    ///
    /// Returns how many were queued. Nothing is queued once the frontier is
    /// closed.
    pub async fn push_all(&self, items: impl IntoIterator<Item = QueuedLink>) -> usize {
        let queued = {
            let mut state = self.state.lock().await;
            if state.closed {
                return 0;
            }

            let before = state.queue.len();
            for item in items {
                if !state.visited.contains(&item.link.uri) {
                    state.queue.push_back(item);
                }
            }
            state.queue.len() - before
        };

        if queued > 0 {
            self.notify.notify_waiters();
        }
        queued
    }

    /// Returns true if `push_all` would queue at least one of `uris`
    pub async fn has_unvisited<'a>(&self, uris: impl IntoIterator<Item = &'a str>) -> bool {
        let state = self.state.lock().await;
        !state.closed && uris.into_iter().any(|uri| !state.visited.contains(uri))
    }

    /// Takes the next unvisited link, waiting while other workers are busy
    ///
    /// The returned link is already marked visited and counted as in flight;
    /// the caller must call [`Frontier::complete`] when done with it.
    pub async fn next(&self) -> Option<QueuedLink> {
        loop {
            // Register interest before inspecting state so a push or
            // complete between the check and the await is not missed.
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.state.lock().await;
                if state.closed {
                    return None;
                }

                while let Some(item) = state.queue.pop_front() {
                    if state.visited.insert(item.link.uri.clone()) {
                        state.in_flight += 1;
                        return Some(item);
                    }
                }

                if state.in_flight == 0 {
                    state.closed = true;
                    drop(state);
                    self.notify.notify_waiters();
                    return None;
                }
            }

            notified.await;
        }
    }

    /// Signals that a link handed out by `next` is fully processed
    pub async fn complete(&self) {
        {
            let mut state = self.state.lock().await;
            state.in_flight = state.in_flight.saturating_sub(1);
        }
        self.notify.notify_waiters();
    }

    /// Stops handing out work; queued links are dropped
    pub async fn close(&self) {
        {
            let mut state = self.state.lock().await;
            state.closed = true;
            state.queue.clear();
        }
        self.notify.notify_waiters();
    }

    #[cfg(test)]
    pub(crate) async fn is_closed(&self) -> bool {
        self.state.lock().await.closed
    }

    /// Number of links waiting in the queue
    pub async fn pending(&self) -> usize {
        self.state.lock().await.queue.len()
    }

    /// Number of distinct URIs marked visited
    pub async fn visited_count(&self) -> usize {
        self.state.lock().await.visited.len()
    }

    #[cfg(test)]
    pub(crate) async fn is_visited(&self, uri: &str) -> bool {
        self.state.lock().await.visited.contains(uri)
    }
}
