//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Walking the video list in order
//! - Driving each video through its state machine
//! - Merging records and accumulating run statistics
//! - Pacing between videos
//! - Handling interrupts while keeping partial results

use crate::analysis::SentimentScorer;
use crate::api::YouTubeApi;
use crate::config::CrawlerConfig;
use crate::crawler::fetcher::fetch_video_meta;
use crate::crawler::flatten::Flattener;
use crate::crawler::walker::CommentWalker;
use crate::model::{CommentOrder, CommentRecord, CrawlCap};
use crate::state::{RunStats, VideoReport, VideoState};
use crate::url::VideoRef;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Per-run crawl settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlOptions {
    pub cap: CrawlCap,
    pub include_replies: bool,
    pub order: CommentOrder,
    pub video_delay: Duration,
    pub request_delay: Duration,
}

impl CrawlOptions {
    /// Builds options from the `[crawler]` configuration section
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            cap: CrawlCap::new(config.max_comments_per_video),
            include_replies: config.include_replies,
            order: config.comment_order,
            video_delay: Duration::from_millis(config.delay_between_videos_ms),
            request_delay: Duration::from_millis(config.delay_between_requests_ms),
        }
    }
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self::from_config(&CrawlerConfig::default())
    }
}

/// Records and statistics of a finished (or interrupted) run
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Records in discovery order
    pub records: Vec<CommentRecord>,

    /// Finalized run statistics
    pub stats: RunStats,
}

/// Main crawler coordinator structure
pub struct Coordinator<'a, A: YouTubeApi + ?Sized> {
    api: &'a A,
    options: CrawlOptions,
    scorer: Option<Arc<dyn SentimentScorer>>,
    cancel: CancellationToken,
}

impl<'a, A: YouTubeApi + ?Sized> Coordinator<'a, A> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `api` - The remote API capability
    /// * `options` - Cap, reply, ordering and pacing settings
    pub fn new(api: &'a A, options: CrawlOptions) -> Self {
        Self {
            api,
            options,
            scorer: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Sets the sentiment scorer; `None` leaves the field empty
    pub fn with_scorer(mut self, scorer: Option<Arc<dyn SentimentScorer>>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Uses an externally owned cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that interrupts the run between videos
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn options(&self) -> &CrawlOptions {
        &self.options
    }

    /// Runs the main crawl loop
    ///
    /// Videos are processed strictly in order. A cancellation observed
    /// between videos ends the loop; everything collected up to that point
    /// is returned with finalized statistics.
    pub async fn run(&self, videos: &[VideoRef]) -> CrawlOutcome {
        let total = videos.len();
        let mut stats = RunStats::new(total);
        let mut records = Vec::new();

        let walker = CommentWalker::new(
            self.api,
            Flattener::new(self.scorer.as_deref()),
            self.options.request_delay,
        );

        tracing::info!(
            "Starting crawl of {} videos (cap {}, replies {}, order {})",
            total,
            self.options.cap.get(),
            self.options.include_replies,
            self.options.order
        );

        for (i, video) in videos.iter().enumerate() {
            let index = i + 1;

            if self.cancel.is_cancelled() {
                tracing::warn!("Crawl interrupted before video {}/{}", index, total);
                stats.interrupted = true;
                break;
            }

            let report = self
                .process_video(index, total, video, &walker, &mut records, &mut stats)
                .await;
            stats.videos.push(report);

            if index < total && !self.pause_between_videos().await {
                tracing::warn!("Crawl interrupted after video {}/{}", index, total);
                stats.interrupted = true;
                break;
            }
        }

        // A cancellation during the final video has no later check point
        if self.cancel.is_cancelled() && !stats.interrupted {
            tracing::warn!("Crawl interrupted during the last video");
            stats.interrupted = true;
        }

        stats.finish();

        tracing::info!(
            "Crawl finished: {}/{} videos, {} comments, {} replies, {} API calls in {}s",
            stats.processed_videos,
            stats.total_videos,
            stats.total_comments,
            stats.total_replies,
            stats.api_calls,
            stats.duration().num_seconds()
        );

        CrawlOutcome { records, stats }
    }

    /// Processes a single video
    ///
    /// This method:
    /// 1. Fetches the video metadata
    /// 2. Skips or fails the video when that lookup yields nothing usable
    /// 3. Walks the comment pages
    /// 4. Appends the records and updates the statistics
    async fn process_video(
        &self,
        index: usize,
        total: usize,
        video: &VideoRef,
        walker: &CommentWalker<'_, A>,
        records: &mut Vec<CommentRecord>,
        stats: &mut RunStats,
    ) -> VideoReport {
        let mut report = VideoReport {
            index,
            video_id: video.id.clone(),
            title: None,
            state: VideoState::Pending,
            comments: 0,
            replies: 0,
            api_calls: 0,
        };

        tracing::info!("[{}/{}] Processing {}", index, total, video.raw);
        advance(&mut report, VideoState::FetchingMeta);

        let meta = match fetch_video_meta(self.api, &video.id).await {
            Ok(Some(meta)) => meta,
            Ok(None) => {
                tracing::warn!("[{}/{}] No metadata for {}, skipping", index, total, video.id);
                stats.skipped_videos += 1;
                advance(&mut report, VideoState::Skipped);
                return report;
            }
            Err(e) => {
                tracing::error!(
                    "[{}/{}] Metadata lookup for {} failed: {}",
                    index,
                    total,
                    video.id,
                    e
                );
                stats.record_error(index, &e);
                advance(&mut report, VideoState::Failed);
                return report;
            }
        };

        report.title = Some(meta.title.clone());
        advance(&mut report, VideoState::FetchingComments);

        let outcome = walker
            .walk(
                &meta,
                self.options.cap,
                self.options.include_replies,
                self.options.order,
            )
            .await;

        if let Some(e) = &outcome.error {
            stats.record_error(index, format!("comment page request failed: {}", e));
        }

        let (comments, replies) = stats.record_batch(&outcome.records);
        stats.api_calls += outcome.api_calls;
        stats.processed_videos += 1;

        report.comments = comments;
        report.replies = replies;
        report.api_calls = outcome.api_calls;

        tracing::info!(
            "[{}/{}] {}: {} comments, {} replies ({:?})",
            index,
            total,
            meta.title,
            comments,
            replies,
            outcome.stop
        );

        records.extend(outcome.records);
        advance(&mut report, VideoState::Done);
        report
    }

    /// Waits out the inter-video delay
    ///
    /// Returns false if the run was cancelled before or during the wait.
    async fn pause_between_videos(&self) -> bool {
        if self.options.video_delay.is_zero() {
            return !self.cancel.is_cancelled();
        }

        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(self.options.video_delay) => true,
        }
    }
}

/// Moves a video to its next state
fn advance(report: &mut VideoReport, next: VideoState) {
    debug_assert!(
        report.state.can_transition_to(next),
        "invalid video transition {} -> {}",
        report.state,
        next
    );
    tracing::trace!("Video {} {} -> {}", report.video_id, report.state, next);
    report.state = next;
}
