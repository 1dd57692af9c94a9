//! Text analysis for flattened records
//!
//! - Whitespace cleaning of comment text
//! - Cheap derived fields (word count, link and mention detection)
//! - The optional sentiment scoring capability

mod sentiment;
mod text;

pub use sentiment::{score_or_neutral, LexiconScorer, SentimentError, SentimentScorer};
pub use text::{clean_text, has_links, has_mentions, word_count, TextFeatures};
