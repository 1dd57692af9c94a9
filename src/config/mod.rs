//! Configuration module for Comment-Crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing keys fall back to the defaults
//! (1000 records per video, replies on, relevance order, 1s between videos,
//! 100ms between pages).
//!
//! # Example
//!
//! ```no_run
//! use comment_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Replies included: {}", config.crawler.include_replies);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, Config, CrawlerConfig, FieldsConfig, OutputConfig, OutputFormat};

// Re-export parser functions
pub use parser::{
    compute_config_hash, hash_content, load_config, load_config_with_hash, parse_config,
};
pub use validation::validate;
