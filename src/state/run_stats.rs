//! Run-scoped statistics aggregate

use crate::model::{CommentKind, CommentRecord};
use crate::state::VideoState;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Outcome of one video within a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoReport {
    /// 1-based position in the video list
    pub index: usize,
    pub video_id: String,
    pub title: Option<String>,
    pub state: VideoState,
    pub comments: usize,
    pub replies: usize,
    pub api_calls: usize,
}

/// Aggregate statistics for a single crawl run
///
/// One instance exists per run. It is owned by the coordinator while the run
/// is in progress and handed back by value once finalized.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    /// Videos in the input list
    pub total_videos: usize,

    /// Videos whose comment walk completed
    pub processed_videos: usize,

    /// Videos without metadata (deleted, private or unknown)
    pub skipped_videos: usize,

    /// Top-level comment records collected
    pub total_comments: usize,

    /// Reply records collected
    pub total_replies: usize,

    /// Thread-list requests issued
    pub api_calls: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Per-video error messages in the order they occurred
    pub errors: Vec<String>,

    /// Set when the run stopped on a cancellation signal
    pub interrupted: bool,

    pub videos: Vec<VideoReport>,
}

impl RunStats {
    /// Starts statistics for a run over `total_videos` videos
    pub fn new(total_videos: usize) -> Self {
        Self {
            total_videos,
            processed_videos: 0,
            skipped_videos: 0,
            total_comments: 0,
            total_replies: 0,
            api_calls: 0,
            started_at: Utc::now(),
            finished_at: None,
            errors: Vec::new(),
            interrupted: false,
            videos: Vec::new(),
        }
    }

    /// Records an error against the 1-based video position
    pub fn record_error(&mut self, index: usize, message: impl std::fmt::Display) {
        self.errors.push(format!("Video {}: {}", index, message));
    }

    /// Adds a batch of records to the comment/reply counters
    ///
    /// Returns the (top-level, reply) counts of the batch.
    pub fn record_batch(&mut self, records: &[CommentRecord]) -> (usize, usize) {
        let replies = records
            .iter()
            .filter(|r| r.kind == CommentKind::Reply)
            .count();
        let comments = records.len() - replies;

        self.total_comments += comments;
        self.total_replies += replies;
        (comments, replies)
    }

    /// Total flattened records (top-level + replies)
    pub fn total_records(&self) -> usize {
        self.total_comments + self.total_replies
    }

    /// Marks the run as finished; later calls keep the first end time
    pub fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Utc::now());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Elapsed time, measured up to now while the run is in progress
    pub fn duration(&self) -> Duration {
        let end = self.finished_at.unwrap_or_else(Utc::now);
        (end - self.started_at).max(Duration::zero())
    }

    /// Records collected per minute; zero when no time has elapsed
    pub fn records_per_minute(&self) -> f64 {
        let millis = self.duration().num_milliseconds();
        if millis <= 0 {
            return 0.0;
        }
        self.total_records() as f64 / (millis as f64 / 60_000.0)
    }
}
