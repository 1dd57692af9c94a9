//! Video URL shape matching
//!
//! Recognized shapes, tried in order:
//! 1. Watch URL carrying a `v=` query parameter
//! 2. Shortened share link (`youtu.be/ID`)
//! 3. Bare 11-character identifier
//! 4. Path-embedded forms (`/embed/ID`, `/v/ID`, `/shorts/ID`)

use url::Url;

/// Length of every video identifier
pub const VIDEO_ID_LEN: usize = 11;

const WATCH_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
];

const SHORT_HOSTS: &[&str] = &["youtu.be", "www.youtu.be"];

const PATH_PREFIXES: &[&str] = &["embed", "v", "shorts"];

/// Returns true if `candidate` is exactly one identifier from the
/// URL-safe base64 alphabet
pub fn is_video_id(candidate: &str) -> bool {
    candidate.len() == VIDEO_ID_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Extracts the video identifier from a user-supplied string
///
/// Total and deterministic: never panics, and the same input always yields
/// the same answer. Surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use comment_crawler::url::resolve_video_id;
///
/// assert_eq!(
///     resolve_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
///     Some("dQw4w9WgXcQ")
/// );
/// assert_eq!(resolve_video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
/// assert_eq!(resolve_video_id("not a video"), None);
/// ```
pub fn resolve_video_id(raw: &str) -> Option<String> {
    let input = raw.trim();
    if input.is_empty() {
        return None;
    }

    let parsed = parse_loose(input);

    if let Some(url) = &parsed {
        if let Some(id) = match_watch(url) {
            return Some(id);
        }
        if let Some(id) = match_short(url) {
            return Some(id);
        }
    }

    if is_video_id(input) {
        return Some(input.to_string());
    }

    parsed.as_ref().and_then(match_path_embedded)
}

/// Parses the input as a URL, tolerating a missing scheme
fn parse_loose(input: &str) -> Option<Url> {
    if input.contains("://") {
        return Url::parse(input).ok();
    }
    // Scheme-less input is only treated as a URL when it looks like one
    if input.contains('/') {
        return Url::parse(&format!("https://{}", input)).ok();
    }
    None
}

fn host_in(url: &Url, hosts: &[&str]) -> bool {
    url.host_str()
        .map(|h| hosts.iter().any(|known| h.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

fn match_watch(url: &Url) -> Option<String> {
    if !host_in(url, WATCH_HOSTS) || url.path().trim_end_matches('/') != "/watch" {
        return None;
    }
    url.query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|value| is_video_id(value))
}

fn match_short(url: &Url) -> Option<String> {
    if !host_in(url, SHORT_HOSTS) {
        return None;
    }
    let first = url.path_segments()?.next()?;
    is_video_id(first).then(|| first.to_string())
}

fn match_path_embedded(url: &Url) -> Option<String> {
    if !host_in(url, WATCH_HOSTS) {
        return None;
    }
    let mut segments = url.path_segments()?;
    let prefix = segments.next()?;
    let id = segments.next()?;
    (PATH_PREFIXES.contains(&prefix) && is_video_id(id)).then(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn test_watch_url() {
        assert_eq!(
            resolve_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            resolve_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=120")
                .as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn test_watch_url_without_scheme() {
        assert_eq!(
            resolve_video_id("youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(resolve_video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(), Some(ID));
        assert_eq!(
            resolve_video_id("https://youtu.be/dQw4w9WgXcQ?si=abc").as_deref(),
            Some(ID)
        );
    }

    #[test]
    fn test_all_shapes_agree() {
        let inputs = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "dQw4w9WgXcQ",
            "  dQw4w9WgXcQ  ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
        ];
        for input in inputs {
            assert_eq!(resolve_video_id(input).as_deref(), Some(ID), "input: {}", input);
        }
    }

    #[test]
    fn test_rejects_non_matching() {
        let inputs = [
            "",
            "   ",
            "short",
            "dQw4w9WgXcQx",
            "dQw4w9WgXc!",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQx",
            "https://www.youtube.com/watch?v=short",
            "https://youtu.be/dQw4w9WgX",
            "https://example.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/channel/UC1234567890",
        ];
        for input in inputs {
            assert_eq!(resolve_video_id(input), None, "input: {:?}", input);
        }
    }

    #[test]
    fn test_is_video_id() {
        assert!(is_video_id("abc-DEF_123"));
        assert!(!is_video_id("abc-DEF_12"));
        assert!(!is_video_id("abc-DEF_1234"));
        assert!(!is_video_id("abc DEF_123"));
    }
}
