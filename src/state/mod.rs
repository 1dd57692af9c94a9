//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `VideoState`: Tracks the state of individual videos (pending, fetching, skipped, done, etc.)
//! - `RunStats`: Run-wide counters, timings and per-video error messages

mod run_stats;
mod video_state;

// Re-export main types
pub use run_stats::{RunStats, VideoReport};
pub use video_state::VideoState;
