//! Crawler module for comment harvesting
//!
//! This module contains the core crawling logic, including:
//! - Video metadata lookup
//! - Cap-bounded comment page walking
//! - Flattening of threads and replies into records
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod flatten;
mod walker;

pub use coordinator::{Coordinator, CrawlOptions, CrawlOutcome};
pub use fetcher::{fetch_video_meta, video_meta_from_item};
pub use flatten::Flattener;
pub use walker::{CommentWalker, WalkOutcome, WalkStop};

use crate::analysis::{LexiconScorer, SentimentScorer};
use crate::api::YouTubeApi;
use crate::config::Config;
use crate::output::{FieldSet, OutputField};
use crate::url::VideoRef;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the crawl options from the configuration
/// 2. Attach the sentiment scorer when it is enabled and its column is kept
/// 3. Walk every video in order
///
/// # Arguments
///
/// * `api` - The remote API capability
/// * `config` - The crawler configuration
/// * `videos` - Resolved videos, in input order
/// * `cancel` - Token that interrupts the run between videos
pub async fn crawl<A>(
    api: &A,
    config: &Config,
    videos: &[VideoRef],
    cancel: CancellationToken,
) -> CrawlOutcome
where
    A: YouTubeApi + ?Sized,
{
    let options = CrawlOptions::from_config(&config.crawler);
    let fields = FieldSet::from_config(config);

    let scorer: Option<Arc<dyn SentimentScorer>> = if fields.contains(OutputField::SentimentScore) {
        Some(Arc::new(LexiconScorer))
    } else {
        None
    };

    Coordinator::new(api, options)
        .with_scorer(scorer)
        .with_cancellation(cancel)
        .run(videos)
        .await
}
