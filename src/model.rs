//! Core data model shared by the crawler and the output layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metadata of one video, fetched once and shared by all of its records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoMeta {
    pub id: String,
    pub title: String,
    pub channel_id: String,
    pub channel_title: String,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
}

impl VideoMeta {
    /// Canonical watch URL of the video
    pub fn url(&self) -> String {
        crate::url::watch_url(&self.id)
    }
}

/// Discriminant between top-level comments and replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CommentKind {
    TopLevel,
    Reply,
}

impl CommentKind {
    /// Value written to the `comment_type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLevel => "main_comment",
            Self::Reply => "reply",
        }
    }
}

impl fmt::Display for CommentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering requested from the comment thread listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentOrder {
    #[default]
    Relevance,
    Time,
}

impl CommentOrder {
    /// Query parameter value understood by the remote API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Time => "time",
        }
    }
}

impl fmt::Display for CommentOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommentOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "time" => Ok(Self::Time),
            other => Err(format!("unknown comment order '{}'", other)),
        }
    }
}

/// Per-video ceiling on flattened records (top-level and replies combined)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlCap(usize);

impl CrawlCap {
    /// Creates a cap; zero is raised to one
    pub fn new(max_records: usize) -> Self {
        Self(max_records.max(1))
    }

    pub fn get(&self) -> usize {
        self.0
    }

    /// Records still allowed after `collected`
    pub fn remaining(&self, collected: usize) -> usize {
        self.0.saturating_sub(collected)
    }

    pub fn is_reached(&self, collected: usize) -> bool {
        collected >= self.0
    }
}

impl Default for CrawlCap {
    fn default() -> Self {
        Self(1000)
    }
}

/// One flattened row: either a top-level comment or a reply
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentRecord {
    pub comment_id: String,
    pub kind: CommentKind,

    pub text: String,
    pub author_name: String,
    pub author_channel_id: String,
    pub author_channel_url: String,
    pub author_profile_image_url: String,
    pub author_is_verified: bool,
    pub author_is_channel_owner: bool,
    pub author_is_sponsor: bool,

    pub liked_by_creator: bool,
    pub hearted_by_creator: bool,
    /// Always false for replies
    pub is_pinned: bool,

    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub like_count: u64,
    /// Always zero for replies
    pub reply_count: u64,

    /// `None` for top-level comments
    pub parent_id: Option<String>,
    pub parent_author: Option<String>,

    pub word_count: usize,
    pub has_links: bool,
    pub has_mentions: bool,
    pub sentiment_score: Option<f64>,

    pub video_id: String,
    pub video_title: String,
    pub video_url: String,
    pub channel_id: String,
    pub channel_title: String,

    pub captured_at: DateTime<Utc>,
}

impl CommentRecord {
    pub fn is_reply(&self) -> bool {
        self.kind == CommentKind::Reply
    }
}
