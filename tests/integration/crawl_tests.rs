//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the YouTube Data API and run
//! the full crawl cycle end-to-end through the HTTP client.

use comment_crawler::api::{ApiClient, ApiError};
use comment_crawler::config::{ApiConfig, Config, OutputFormat};
use comment_crawler::crawler::crawl;
use comment_crawler::output::persist;
use comment_crawler::url::resolve_all;
use comment_crawler::{CommentKind, CommentOrder, VideoState};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "AIzaSyTEST0123456789abcdefghijklmnopq";
const VIDEO_A: &str = "dQw4w9WgXcQ";
const VIDEO_B: &str = "9bZkp7q19f0";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api = ApiConfig {
        base_url: base_url.to_string(),
        key: None,
        timeout_secs: 5,
    };
    config.crawler.delay_between_videos_ms = 0;
    config.crawler.delay_between_requests_ms = 0;
    config
}

fn client_for(config: &Config) -> ApiClient {
    ApiClient::new(&config.api, KEY).expect("Failed to build client")
}

fn video_body(id: &str, title: &str) -> Value {
    json!({
        "items": [{
            "id": id,
            "snippet": {
                "title": title,
                "channelId": "UCowner",
                "channelTitle": "Owner"
            },
            "statistics": {
                "viewCount": "1000",
                "likeCount": "50",
                "commentCount": "4"
            }
        }]
    })
}

fn comment(id: &str, text: &str, author: &str) -> Value {
    json!({
        "id": id,
        "snippet": {
            "textDisplay": text,
            "authorDisplayName": author,
            "authorProfileImageUrl": format!("https://yt3.example/{}.jpg", author),
            "authorChannelId": { "value": format!("UC{}", author) },
            "viewerRating": "none",
            "likeCount": 2,
            "publishedAt": "2024-01-01T12:00:00Z",
            "updatedAt": "2024-01-01T12:00:00Z"
        }
    })
}

fn thread(id: &str, text: &str, replies: Vec<Value>) -> Value {
    json!({
        "id": id,
        "snippet": {
            "topLevelComment": comment(id, text, "alice"),
            "totalReplyCount": replies.len(),
            "isPinned": false
        },
        "replies": { "comments": replies }
    })
}

async fn mount_video(server: &MockServer, id: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", id))
        .and(query_param("key", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_with_pagination_and_skip() {
    let server = MockServer::start().await;
    let config = create_test_config(&server.uri());

    mount_video(&server, VIDEO_A, video_body(VIDEO_A, "First video")).await;
    mount_video(&server, VIDEO_B, json!({ "items": [] })).await;

    // Second page first: the earliest mounted matching mock answers
    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .and(query_param("videoId", VIDEO_A))
        .and(query_param("pageToken", "PAGE2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [thread("c3", "third one", vec![])]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .and(query_param("videoId", VIDEO_A))
        .and(query_param("part", "snippet,replies"))
        .and(query_param("textFormat", "plainText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                thread("c1", "great video @bob", vec![comment("c1.r1", "thanks!", "bob")]),
                thread("c2", "see https://example.com", vec![]),
            ],
            "nextPageToken": "PAGE2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&config);
    let (videos, rejected) = resolve_all([
        format!("https://www.youtube.com/watch?v={}", VIDEO_A),
        format!("https://youtu.be/{}", VIDEO_B),
        "not a video".to_string(),
    ]);
    assert_eq!(rejected, vec!["not a video".to_string()]);

    let outcome = crawl(&client, &config, &videos, CancellationToken::new()).await;
    let stats = &outcome.stats;

    assert_eq!(stats.total_videos, 2);
    assert_eq!(stats.processed_videos, 1);
    assert_eq!(stats.skipped_videos, 1);
    assert_eq!(stats.total_comments, 3);
    assert_eq!(stats.total_replies, 1);
    assert_eq!(stats.api_calls, 2);
    assert!(stats.errors.is_empty(), "unexpected errors: {:?}", stats.errors);
    assert_eq!(stats.videos[0].state, VideoState::Done);
    assert_eq!(stats.videos[1].state, VideoState::Skipped);

    let ids: Vec<_> = outcome.records.iter().map(|r| r.comment_id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c1.r1", "c2", "c3"]);

    let reply = &outcome.records[1];
    assert_eq!(reply.kind, CommentKind::Reply);
    assert_eq!(reply.parent_id.as_deref(), Some("c1"));
    assert_eq!(reply.parent_author.as_deref(), Some("alice"));
    assert_eq!(reply.video_title, "First video");

    assert!(outcome.records[0].has_mentions);
    assert!(outcome.records[2].has_links);
    assert!(outcome.records[0].sentiment_score.is_some());
    assert!(outcome
        .records
        .iter()
        .all(|r| r.video_url == format!("https://www.youtube.com/watch?v={}", VIDEO_A)));
}

#[tokio::test]
async fn test_cap_bounds_page_size_and_records() {
    let server = MockServer::start().await;
    let mut config = create_test_config(&server.uri());
    config.crawler.max_comments_per_video = 5;

    mount_video(&server, VIDEO_A, video_body(VIDEO_A, "Capped")).await;

    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .and(query_param("maxResults", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                thread("t1", "one", vec![comment("t1.r1", "r", "bob")]),
                thread("t2", "two", vec![comment("t2.r1", "r", "bob")]),
                thread("t3", "three", vec![comment("t3.r1", "r", "bob")]),
            ],
            "nextPageToken": "MORE"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&config);
    let (videos, _) = resolve_all([VIDEO_A]);
    let outcome = crawl(&client, &config, &videos, CancellationToken::new()).await;

    assert_eq!(outcome.records.len(), 5);
    assert_eq!(outcome.stats.total_comments, 3);
    assert_eq!(outcome.stats.total_replies, 2);
    assert_eq!(outcome.stats.api_calls, 1);
}

#[tokio::test]
async fn test_order_and_no_replies() {
    let server = MockServer::start().await;
    let mut config = create_test_config(&server.uri());
    config.crawler.comment_order = CommentOrder::Time;
    config.crawler.include_replies = false;
    config.crawler.sentiment = false;

    mount_video(&server, VIDEO_A, video_body(VIDEO_A, "Ordered")).await;

    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .and(query_param("order", "time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [thread("t1", "one", vec![comment("t1.r1", "r", "bob")])]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&config);
    let (videos, _) = resolve_all([VIDEO_A]);
    let outcome = crawl(&client, &config, &videos, CancellationToken::new()).await;

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].kind, CommentKind::TopLevel);
    assert_eq!(outcome.records[0].reply_count, 1);
    assert_eq!(outcome.records[0].sentiment_score, None);
}

#[tokio::test]
async fn test_metadata_error_is_recorded_and_run_continues() {
    let server = MockServer::start().await;
    let config = create_test_config(&server.uri());

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", VIDEO_A))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "The request cannot be completed because you have exceeded your quota.",
                "errors": [{ "reason": "quotaExceeded" }]
            }
        })))
        .mount(&server)
        .await;

    mount_video(&server, VIDEO_B, video_body(VIDEO_B, "Second")).await;

    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .and(query_param("videoId", VIDEO_B))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [thread("b1", "hello", vec![])]
        })))
        .mount(&server)
        .await;

    let client = client_for(&config);
    let (videos, _) = resolve_all([VIDEO_A, VIDEO_B]);
    let outcome = crawl(&client, &config, &videos, CancellationToken::new()).await;

    assert_eq!(outcome.stats.errors.len(), 1);
    assert!(outcome.stats.errors[0].starts_with("Video 1: "));
    assert!(outcome.stats.errors[0].contains("quota"));
    assert_eq!(outcome.stats.processed_videos, 1);
    assert_eq!(outcome.stats.videos[0].state, VideoState::Failed);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].video_id, VIDEO_B);
}

#[tokio::test]
async fn test_page_error_keeps_collected_records() {
    let server = MockServer::start().await;
    let config = create_test_config(&server.uri());

    mount_video(&server, VIDEO_A, video_body(VIDEO_A, "Flaky")).await;

    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .and(query_param("pageToken", "PAGE2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [thread("t1", "one", vec![])],
            "nextPageToken": "PAGE2"
        })))
        .mount(&server)
        .await;

    let client = client_for(&config);
    let (videos, _) = resolve_all([VIDEO_A]);
    let outcome = crawl(&client, &config, &videos, CancellationToken::new()).await;

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.stats.api_calls, 1);
    assert_eq!(outcome.stats.processed_videos, 1);
    assert_eq!(outcome.stats.errors.len(), 1);
    assert!(outcome.stats.errors[0].contains("HTTP 500"));
}

#[tokio::test]
async fn test_crawl_results_persist_to_sqlite() {
    let server = MockServer::start().await;
    let dir = tempfile::TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri());
    config.output.format = OutputFormat::Sqlite;
    config.output.directory = dir.path().to_path_buf();
    config.output.include_timestamp = false;

    mount_video(&server, VIDEO_A, video_body(VIDEO_A, "Stored")).await;
    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [thread("t1", "one", vec![comment("t1.r1", "two", "bob")])]
        })))
        .mount(&server)
        .await;

    let client = client_for(&config);
    let (videos, _) = resolve_all([VIDEO_A]);
    let outcome = crawl(&client, &config, &videos, CancellationToken::new()).await;

    let written = persist(&outcome.records, &config, Some("hash"))
        .unwrap()
        .unwrap();
    assert_eq!(written.records_path, dir.path().join("youtube_comments.db"));
    assert_eq!(
        written.config_path,
        Some(dir.path().join("youtube_comments_config.json"))
    );

    let conn = rusqlite::Connection::open(&written.records_path).unwrap();
    let parent: String = conn
        .query_row(
            "SELECT parent_id FROM comments WHERE comment_type = 'reply'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(parent, "t1");
}

#[tokio::test]
async fn test_validate_key() {
    let server = MockServer::start().await;
    let config = create_test_config(&server.uri());

    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("forUsername", "YouTube"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client_for(&config).validate_key().await.is_ok());
}

#[tokio::test]
async fn test_validate_key_reports_diagnosis() {
    let server = MockServer::start().await;
    let config = create_test_config(&server.uri());

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "errors": [{ "reason": "keyInvalid" }]
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&config).validate_key().await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.diagnosis().unwrap().contains("invalid"));
}

#[test]
fn test_short_key_rejected_before_any_request() {
    let config = create_test_config("http://127.0.0.1:9");
    let err = ApiClient::new(&config.api, "too-short").unwrap_err();
    assert!(matches!(err, ApiError::InvalidKey(_)));
}
