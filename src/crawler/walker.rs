//! Comment page walker
//!
//! Pages through the comment threads of one video, flattening each thread
//! (and optionally its nested replies) until the per-video cap is reached,
//! the listing runs out of pages, or a request fails.

use crate::api::{ApiError, CommentThread, ThreadPageRequest, YouTubeApi, MAX_PAGE_SIZE};
use crate::crawler::flatten::Flattener;
use crate::model::{CommentOrder, CommentRecord, CrawlCap, VideoMeta};
use std::time::Duration;

/// Why a walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStop {
    /// The per-video cap was reached
    CapReached,
    /// No continuation token, or an empty page
    Exhausted,
    /// A page request failed; records collected so far are kept
    Failed,
}

/// Result of walking one video
#[derive(Debug)]
pub struct WalkOutcome {
    /// Records in discovery order, never more than the cap
    pub records: Vec<CommentRecord>,

    /// Thread-list requests that returned a page
    pub api_calls: usize,

    pub stop: WalkStop,

    /// The failure that ended the walk, if any
    pub error: Option<ApiError>,
}

/// Walks the comment pages of a video
pub struct CommentWalker<'a, A: YouTubeApi + ?Sized> {
    api: &'a A,
    flattener: Flattener<'a>,
    request_delay: Duration,
}

impl<'a, A: YouTubeApi + ?Sized> CommentWalker<'a, A> {
    /// Creates a walker
    ///
    /// # Arguments
    ///
    /// * `api` - Remote API used for thread-list requests
    /// * `flattener` - Converts threads into records
    /// * `request_delay` - Pause between two page requests (not before the first)
    pub fn new(api: &'a A, flattener: Flattener<'a>, request_delay: Duration) -> Self {
        Self {
            api,
            flattener,
            request_delay,
        }
    }

    /// Collects up to `cap` records for `video`
    pub async fn walk(
        &self,
        video: &VideoMeta,
        cap: CrawlCap,
        include_replies: bool,
        order: CommentOrder,
    ) -> WalkOutcome {
        let mut records = Vec::new();
        let mut api_calls = 0;
        let mut page_token: Option<String> = None;
        let mut first_request = true;

        let (stop, error) = loop {
            if !first_request && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
            first_request = false;

            let remaining = cap.remaining(records.len());
            let request = ThreadPageRequest {
                video_id: video.id.clone(),
                page_size: remaining.min(MAX_PAGE_SIZE as usize) as u32,
                order,
                page_token: page_token.take(),
            };

            let page = match self.api.list_comment_threads(&request).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(
                        "Comment page request for {} failed after {} records: {}",
                        video.id,
                        records.len(),
                        e
                    );
                    break (WalkStop::Failed, Some(e));
                }
            };
            api_calls += 1;

            if page.items.is_empty() {
                tracing::debug!("Empty comment page for {}, treating as exhausted", video.id);
                break (WalkStop::Exhausted, None);
            }

            self.absorb_page(&page.items, video, cap, include_replies, &mut records);
            tracing::debug!(
                "Page {} of {}: {} threads, {} records so far",
                api_calls,
                video.id,
                page.items.len(),
                records.len()
            );

            if cap.is_reached(records.len()) {
                break (WalkStop::CapReached, None);
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break (WalkStop::Exhausted, None),
            }
        };

        // Absorption already refuses to go past the cap; this only guards it
        records.truncate(cap.get());

        WalkOutcome {
            records,
            api_calls,
            stop,
            error,
        }
    }

    /// Appends one page worth of records, stopping the instant the cap is hit
    fn absorb_page(
        &self,
        threads: &[CommentThread],
        video: &VideoMeta,
        cap: CrawlCap,
        include_replies: bool,
        records: &mut Vec<CommentRecord>,
    ) {
        for thread in threads {
            if cap.is_reached(records.len()) {
                return;
            }

            let parent = self.flattener.top_level(thread, video);
            let replies: Vec<CommentRecord> = if include_replies {
                thread
                    .nested_replies()
                    .iter()
                    .take(cap.remaining(records.len() + 1))
                    .map(|reply| self.flattener.reply(reply, &parent))
                    .collect()
            } else {
                Vec::new()
            };

            records.push(parent);
            records.extend(replies);
        }
    }
}
