//! Crawl frontier: the shared queue of pending pages plus the seen set
//!
//! The seen set is the only deduplication authority. A URL is checked and
//! recorded in it under the same lock that pushes the page, so a URL can be
//! enqueued at most once over the life of a crawl no matter how many workers
//! discover it at the same time.

use crate::crawler::sitemap::Page;
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct FrontierState {
    /// Pages waiting to be crawled, oldest first
    pending: VecDeque<Page>,

    /// Every URL ever admitted; never shrinks
    seen: HashSet<String>,
}

/// Concurrent FIFO frontier shared by all workers of one crawl
#[derive(Debug, Default)]
pub struct Frontier {
    state: Mutex<FrontierState>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits `url` if it has never been seen
    ///
    /// Returns true if a new page was pushed onto the queue, false if the URL
    /// was already seen. Two concurrent calls with the same URL never both
    /// return true.
    pub fn try_enqueue(&self, url: &str) -> bool {
        let mut state = self.lock();
        if state.seen.contains(url) {
            return false;
        }
        state.seen.insert(url.to_string());
        state.pending.push_back(Page::new(url));
        true
    }

    /// Pops the oldest pending page without waiting
    ///
    /// None means the queue is empty right now. Other workers may still push
    /// more pages later.
    pub fn take(&self) -> Option<Page> {
        self.lock().pending.pop_front()
    }

    /// Number of pages waiting to be crawled
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Number of distinct URLs ever admitted
    pub fn seen_len(&self) -> usize {
        self.lock().seen.len()
    }

    /// Returns true if `url` has been admitted at some point
    pub fn has_seen(&self, url: &str) -> bool {
        self.lock().seen.contains(url)
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        // Every critical section leaves the state consistent, so a poisoned
        // lock is still safe to reuse.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
