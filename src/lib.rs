//! Comment-Crawler: a paginated comment thread harvester
//!
//! This crate walks a list of videos, pages through their comment threads
//! (and nested replies) under a per-video cap, flattens everything into
//! tabular records and hands the result set plus run statistics to the
//! output layer.

pub mod analysis;
pub mod api;
pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Comment-Crawler operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] api::ApiError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No valid video URLs or identifiers were provided")]
    NoVideos,

    #[error("No API key found (use --api-key, YOUTUBE_API_KEY, [api].key or api_key.txt)")]
    MissingApiKey,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Comment-Crawler operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlOptions, CrawlOutcome};
pub use model::{CommentKind, CommentOrder, CommentRecord, CrawlCap, VideoMeta};
pub use state::{RunStats, VideoState};
pub use crate::url::{resolve_video_id, VideoRef};
