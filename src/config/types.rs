use crate::model::CommentOrder;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for Comment-Crawler
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub api: ApiConfig,
    pub output: OutputConfig,
    pub fields: FieldsConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum records (comments + replies) collected per video
    pub max_comments_per_video: usize,

    /// Whether nested replies are flattened into records
    pub include_replies: bool,

    /// Ordering requested from the thread listing
    pub comment_order: CommentOrder,

    /// Pause between two videos (milliseconds)
    pub delay_between_videos_ms: u64,

    /// Pause between two page requests of the same video (milliseconds)
    pub delay_between_requests_ms: u64,

    /// Whether the built-in sentiment scorer is used
    pub sentiment: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_comments_per_video: 1000,
            include_replies: true,
            comment_order: CommentOrder::Relevance,
            delay_between_videos_ms: 1000,
            delay_between_requests_ms: 100,
            sentiment: true,
        }
    }
}

/// Remote API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ApiConfig {
    /// Root of the Data API, e.g. `https://www.googleapis.com/youtube/v3`
    pub base_url: String,

    /// API key; command line and environment take priority
    #[serde(skip_serializing)]
    pub key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            key: None,
            timeout_secs: 30,
        }
    }
}

/// Tabular format of the persisted records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Sqlite,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    pub format: OutputFormat,

    /// Directory receiving the record file and config snapshot
    pub directory: PathBuf,

    pub filename_prefix: String,

    /// Append `_YYYYmmdd_HHMMSS` to the file name
    pub include_timestamp: bool,

    /// Write the effective configuration next to the records
    pub save_config: bool,

    /// Optional markdown run report
    pub summary_path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            directory: PathBuf::from("."),
            filename_prefix: "youtube_comments".to_string(),
            include_timestamp: true,
            save_config: true,
            summary_path: None,
        }
    }
}

/// Output column selection
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldsConfig {
    /// Names of output fields to leave out
    pub disabled: Vec<String>,
}
