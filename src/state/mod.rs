//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `WorkerState`: Tracks where each pool worker is in its
//!   take/fetch/link/record cycle

mod worker_state;

// Re-export main types
pub use worker_state::WorkerState;
