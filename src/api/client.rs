//! HTTP implementation of the remote API boundary
//!
//! This module handles all requests to the YouTube Data API v3, including:
//! - Building the HTTP client with a proper user agent and timeouts
//! - Video metadata lookups
//! - Comment thread page requests
//! - API key validation
//! - Mapping error responses onto [`ApiError`]

use crate::api::models::{CommentThreadListResponse, ErrorEnvelope, VideoItem, VideoListResponse};
use crate::api::{ApiError, ApiResult, ThreadPage, ThreadPageRequest, YouTubeApi};
use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Keys shorter than this are rejected without a request
pub const MIN_KEY_LEN: usize = 30;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The API configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ApiConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// YouTube Data API client authenticated with an API key
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    /// Creates a client for the configured endpoint
    ///
    /// # Errors
    ///
    /// * `ApiError::InvalidKey` - The key is obviously malformed
    /// * `ApiError::Transport` - The HTTP client could not be built
    pub fn new(config: &ApiConfig, api_key: &str) -> ApiResult<Self> {
        let api_key = api_key.trim();
        if api_key.len() < MIN_KEY_LEN {
            return Err(ApiError::InvalidKey(format!(
                "expected at least {} characters, got {}",
                MIN_KEY_LEN,
                api_key.len()
            )));
        }

        Ok(Self {
            client: build_http_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Performs a cheap channel lookup to confirm the key is usable
    pub async fn validate_key(&self) -> ApiResult<()> {
        tracing::debug!("Validating API key against {}", self.base_url);
        let _: serde_json::Value = self
            .get_json("channels", &[("part", "snippet"), ("forUsername", "YouTube")])
            .await?;
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> ApiResult<T> {
        let url = format!("{}/{}", self.base_url, resource);
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let response = check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(format!("{}: {}", resource, e)))
    }
}

/// Converts non-success responses into `ApiError::Http`
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let (reason, message) = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => (
            envelope.error.errors.iter().find_map(|d| d.reason.clone()),
            envelope.error.message,
        ),
        Err(_) => (
            None,
            status.canonical_reason().unwrap_or("request failed").to_string(),
        ),
    };

    Err(ApiError::Http {
        status: status.as_u16(),
        reason,
        message,
    })
}

#[async_trait]
impl YouTubeApi for ApiClient {
    async fn list_video_info(&self, video_id: &str) -> ApiResult<Option<VideoItem>> {
        let response: VideoListResponse = self
            .get_json("videos", &[("part", "snippet,statistics"), ("id", video_id)])
            .await?;
        Ok(response.items.into_iter().next())
    }

    async fn list_comment_threads(&self, request: &ThreadPageRequest) -> ApiResult<ThreadPage> {
        let page_size = request.page_size.to_string();
        let mut params = vec![
            ("part", "snippet,replies"),
            ("videoId", request.video_id.as_str()),
            ("maxResults", page_size.as_str()),
            ("order", request.order.as_str()),
            ("textFormat", "plainText"),
        ];
        if let Some(token) = &request.page_token {
            params.push(("pageToken", token.as_str()));
        }

        let response: CommentThreadListResponse = self.get_json("commentThreads", &params).await?;
        Ok(ThreadPage {
            items: response.items,
            next_page_token: response.next_page_token,
        })
    }
}
