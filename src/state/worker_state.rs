/// Worker state definitions for tracking crawl progress
///
/// Each worker in the pool cycles through these states once per page it
/// crawls, and ends in `Stopped` once it finds the frontier empty.
use std::fmt;

/// Represents the current state of a crawl worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerState {
    /// Waiting to take the next page from the frontier
    Idle,

    /// Fetching and parsing the current page
    Fetching,

    /// Filtering discovered links and enqueueing new ones
    Linking,

    /// Writing the completed page into the sitemap
    Recording,

    /// Found the frontier empty; this worker's run is over
    Stopped,
}

impl WorkerState {
    /// Returns true if moving from `self` to `next` is a legal transition
    ///
    /// ```text
    /// Idle -> Fetching -> Linking -> Recording -> Idle
    /// Fetching -> Idle      (fetch failed, page dropped)
    /// Idle -> Stopped       (frontier empty)
    /// ```
    pub fn can_transition_to(&self, next: WorkerState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Fetching)
                | (Self::Idle, Self::Stopped)
                | (Self::Fetching, Self::Linking)
                | (Self::Fetching, Self::Idle)
                | (Self::Linking, Self::Recording)
                | (Self::Recording, Self::Idle)
        )
    }

    /// Short lowercase name used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::Linking => "linking",
            Self::Recording => "recording",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
