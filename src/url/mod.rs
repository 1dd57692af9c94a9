//! URL handling module for Comment-Crawler
//!
//! This module turns user-supplied strings into normalized video identifiers.

mod matcher;

pub use matcher::{is_video_id, resolve_video_id, VIDEO_ID_LEN};

/// A user-supplied video reference with its resolved identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef {
    /// The string exactly as the user supplied it
    pub raw: String,

    /// The normalized 11-character identifier
    pub id: String,
}

impl VideoRef {
    /// Resolves a raw input into a video reference
    ///
    /// Returns `None` when no recognized shape matches.
    pub fn resolve(raw: &str) -> Option<Self> {
        resolve_video_id(raw).map(|id| Self {
            raw: raw.to_string(),
            id,
        })
    }

    /// Canonical watch URL for this video
    pub fn watch_url(&self) -> String {
        watch_url(&self.id)
    }
}

/// Builds the canonical watch URL for a video identifier
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Builds the channel URL for a channel identifier
pub fn channel_url(channel_id: &str) -> String {
    format!("https://www.youtube.com/channel/{}", channel_id)
}

/// Resolves a batch of inputs, preserving order
///
/// Returns the resolved references and the inputs that could not be resolved.
/// Blank entries are ignored entirely.
pub fn resolve_all<I, S>(inputs: I) -> (Vec<VideoRef>, Vec<String>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut resolved = Vec::new();
    let mut rejected = Vec::new();

    for input in inputs {
        let input = input.as_ref().trim();
        if input.is_empty() {
            continue;
        }
        match VideoRef::resolve(input) {
            Some(video) => resolved.push(video),
            None => rejected.push(input.to_string()),
        }
    }

    (resolved, rejected)
}

/// Splits a list file into candidate entries
///
/// Blank lines and lines starting with `#` are skipped; a line may hold
/// several whitespace-separated entries.
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(str::to_string))
        .collect()
}
