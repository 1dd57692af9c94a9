//! Video metadata lookup
//!
//! One remote call per video. A lookup that matches nothing (deleted,
//! private or mistyped identifier) is a soft `Ok(None)`; transport and
//! authorization failures propagate so the coordinator can decide.

use crate::api::{ApiResult, VideoItem, YouTubeApi};
use crate::model::VideoMeta;

/// Fetches metadata for a single video
///
/// # Returns
///
/// * `Ok(Some(VideoMeta))` - The video exists
/// * `Ok(None)` - The API reported zero matching items
/// * `Err(ApiError)` - The request itself failed
pub async fn fetch_video_meta<A>(api: &A, video_id: &str) -> ApiResult<Option<VideoMeta>>
where
    A: YouTubeApi + ?Sized,
{
    let item = api.list_video_info(video_id).await?;
    Ok(item.map(|item| video_meta_from_item(item, video_id)))
}

/// Converts a wire item into the crawler's metadata record
pub fn video_meta_from_item(item: VideoItem, requested_id: &str) -> VideoMeta {
    let id = if item.id.is_empty() {
        requested_id.to_string()
    } else {
        item.id
    };
    let stats = item.statistics.unwrap_or_default();

    VideoMeta {
        id,
        title: item.snippet.title,
        channel_id: item.snippet.channel_id,
        channel_title: item.snippet.channel_title,
        view_count: parse_count(stats.view_count.as_deref()),
        like_count: parse_count(stats.like_count.as_deref()),
        comment_count: parse_count(stats.comment_count.as_deref()),
    }
}

fn parse_count(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{VideoSnippet, VideoStatistics};

    fn item(id: &str) -> VideoItem {
        VideoItem {
            id: id.to_string(),
            snippet: VideoSnippet {
                title: "Launch day".to_string(),
                channel_id: "UCchan".to_string(),
                channel_title: "Channel".to_string(),
            },
            statistics: Some(VideoStatistics {
                view_count: Some("1200".to_string()),
                like_count: Some("not-a-number".to_string()),
                comment_count: None,
            }),
        }
    }

    #[test]
    fn test_video_meta_from_item() {
        let meta = video_meta_from_item(item("abcdefghijk"), "abcdefghijk");
        assert_eq!(meta.id, "abcdefghijk");
        assert_eq!(meta.title, "Launch day");
        assert_eq!(meta.channel_id, "UCchan");
        assert_eq!(meta.channel_title, "Channel");
        assert_eq!(meta.view_count, Some(1200));
        assert_eq!(meta.like_count, None);
        assert_eq!(meta.comment_count, None);
        assert_eq!(meta.url(), "https://www.youtube.com/watch?v=abcdefghijk");
    }

    #[test]
    fn test_missing_item_id_falls_back_to_request() {
        let meta = video_meta_from_item(item(""), "abcdefghijk");
        assert_eq!(meta.id, "abcdefghijk");
    }
}
