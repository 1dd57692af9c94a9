//! Flattening of nested comment threads into independent records
//!
//! Top-level comments and replies go through the same `build_record` path so
//! the two kinds can never drift apart in the fields they carry.

use crate::analysis::{clean_text, score_or_neutral, SentimentScorer, TextFeatures};
use crate::api::{Comment, CommentThread};
use crate::model::{CommentKind, CommentRecord, VideoMeta};
use crate::url::channel_url;
use chrono::Utc;

/// Video linkage copied into every record
struct VideoLink<'a> {
    video_id: &'a str,
    video_title: &'a str,
    video_url: String,
    channel_id: &'a str,
    channel_title: &'a str,
}

/// Converts wire comments into [`CommentRecord`]s
#[derive(Clone, Copy, Default)]
pub struct Flattener<'a> {
    scorer: Option<&'a dyn SentimentScorer>,
}

impl<'a> Flattener<'a> {
    /// Creates a flattener; without a scorer the sentiment field stays empty
    pub fn new(scorer: Option<&'a dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    pub fn scores_sentiment(&self) -> bool {
        self.scorer.is_some()
    }

    /// Flattens the top-level comment of a thread
    pub fn top_level(&self, thread: &CommentThread, video: &VideoMeta) -> CommentRecord {
        let comment = &thread.snippet.top_level_comment;
        let link = VideoLink {
            video_id: &video.id,
            video_title: &video.title,
            video_url: video.url(),
            channel_id: &video.channel_id,
            channel_title: &video.channel_title,
        };

        let mut record = self.build_record(comment, CommentKind::TopLevel, link);
        if record.comment_id.is_empty() {
            record.comment_id = thread.id.clone();
        }
        record.is_pinned = thread.snippet.is_pinned;
        record.reply_count = thread.snippet.total_reply_count;
        record
    }

    /// Flattens a nested reply; parent and video linkage come from `parent`
    pub fn reply(&self, reply: &Comment, parent: &CommentRecord) -> CommentRecord {
        let link = VideoLink {
            video_id: &parent.video_id,
            video_title: &parent.video_title,
            video_url: parent.video_url.clone(),
            channel_id: &parent.channel_id,
            channel_title: &parent.channel_title,
        };

        let mut record = self.build_record(reply, CommentKind::Reply, link);
        record.parent_id = Some(parent.comment_id.clone());
        record.parent_author = Some(parent.author_name.clone());
        record
    }

    fn build_record(
        &self,
        comment: &Comment,
        kind: CommentKind,
        link: VideoLink<'_>,
    ) -> CommentRecord {
        let snippet = &comment.snippet;
        let text = clean_text(&snippet.text_display);
        let features = TextFeatures::of(&text);
        let sentiment_score = self
            .scorer
            .filter(|_| !text.is_empty())
            .map(|scorer| score_or_neutral(scorer, &text));

        let author_channel_id = snippet.author_channel_id().to_string();
        let author_channel_url = if author_channel_id.is_empty() {
            String::new()
        } else {
            channel_url(&author_channel_id)
        };
        let rating = snippet.viewer_rating.as_deref().unwrap_or("");

        CommentRecord {
            comment_id: comment.id.clone(),
            kind,
            author_name: snippet.author_display_name.clone(),
            author_channel_id,
            author_channel_url,
            author_profile_image_url: snippet.author_profile_image_url.clone(),
            author_is_verified: snippet.author_is_verified,
            author_is_channel_owner: snippet.author_is_channel_owner,
            author_is_sponsor: snippet.author_is_sponsor,
            liked_by_creator: rating == "like",
            hearted_by_creator: rating == "heart",
            is_pinned: false,
            published_at: snippet.published_at,
            updated_at: snippet.updated_at,
            like_count: snippet.like_count,
            reply_count: 0,
            parent_id: None,
            parent_author: None,
            word_count: features.word_count,
            has_links: features.has_links,
            has_mentions: features.has_mentions,
            sentiment_score,
            video_id: link.video_id.to_string(),
            video_title: link.video_title.to_string(),
            video_url: link.video_url,
            channel_id: link.channel_id.to_string(),
            channel_title: link.channel_title.to_string(),
            captured_at: Utc::now(),
            text,
        }
    }
}
