//! Remote API boundary
//!
//! The crawler only depends on the [`YouTubeApi`] trait; [`ApiClient`] is the
//! HTTP implementation used by the binary, tests substitute in-memory fakes.

mod client;
mod credentials;
mod error;
pub mod models;

pub use client::{build_http_client, ApiClient, MIN_KEY_LEN};
pub use credentials::{resolve_api_key, KEY_FILE};
pub use error::{ApiError, ApiResult};
pub use models::{Comment, CommentThread, VideoItem};

use crate::model::CommentOrder;
use async_trait::async_trait;

/// Largest page the thread listing accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Parameters of one thread-list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadPageRequest {
    pub video_id: String,
    pub page_size: u32,
    pub order: CommentOrder,
    pub page_token: Option<String>,
}

/// One page of comment threads
#[derive(Debug, Clone, Default)]
pub struct ThreadPage {
    pub items: Vec<CommentThread>,
    /// Absent when there are no further pages
    pub next_page_token: Option<String>,
}

/// Capabilities the crawler consumes from the remote video-hosting API
#[async_trait]
pub trait YouTubeApi: Send + Sync {
    /// Looks up a video; `Ok(None)` when nothing matches the identifier
    async fn list_video_info(&self, video_id: &str) -> ApiResult<Option<VideoItem>>;

    /// Fetches one page of comment threads
    async fn list_comment_threads(&self, request: &ThreadPageRequest) -> ApiResult<ThreadPage>;
}
