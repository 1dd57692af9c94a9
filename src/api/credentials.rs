//! API key lookup

use std::path::Path;

/// Default key file, read from the working directory
pub const KEY_FILE: &str = "api_key.txt";

/// Template value shipped in sample key files
const PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Picks the first usable key
///
/// Order: explicit value (command line or `YOUTUBE_API_KEY`), the `[api].key`
/// config value, then the first non-comment line of `key_file`. Blank values
/// and the template placeholder are skipped.
pub fn resolve_api_key(
    explicit: Option<&str>,
    configured: Option<&str>,
    key_file: &Path,
) -> Option<String> {
    explicit
        .and_then(usable)
        .or_else(|| configured.and_then(usable))
        .or_else(|| read_key_file(key_file))
}

fn usable(key: &str) -> Option<String> {
    let key = key.trim();
    if key.is_empty() || key == PLACEHOLDER {
        None
    } else {
        Some(key.to_string())
    }
}

fn read_key_file(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let key = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .and_then(usable);

    if key.is_some() {
        tracing::debug!("Using API key from {}", path.display());
    }
    key
}
