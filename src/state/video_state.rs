/// Per-video state definitions for tracking crawl progress
///
/// ```text
/// Pending -> FetchingMeta -> Skipped
///                         -> Failed
///                         -> FetchingComments -> Done
/// ```
use serde::Serialize;
use std::fmt;

/// Represents the current state of a video in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VideoState {
    // ===== Active States =====
    /// Not yet visited
    Pending,

    /// Metadata lookup in flight
    FetchingMeta,

    /// Comment pages being walked
    FetchingComments,

    // ===== Terminal States =====
    /// Metadata lookup found no such video
    Skipped,

    /// Metadata lookup failed
    Failed,

    /// Comment walk finished (possibly with partial records)
    Done,
}

impl VideoState {
    /// Returns true if no further processing happens in this state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Skipped | Self::Failed | Self::Done)
    }

    /// Returns true if the video counts as processed
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: VideoState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::FetchingMeta)
                | (Self::FetchingMeta, Self::Skipped)
                | (Self::FetchingMeta, Self::Failed)
                | (Self::FetchingMeta, Self::FetchingComments)
                | (Self::FetchingComments, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::FetchingMeta => "fetching_meta",
            Self::FetchingComments => "fetching_comments",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for VideoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(!VideoState::Pending.is_terminal());
        assert!(!VideoState::FetchingMeta.is_terminal());
        assert!(!VideoState::FetchingComments.is_terminal());

        assert!(VideoState::Skipped.is_terminal());
        assert!(VideoState::Failed.is_terminal());
        assert!(VideoState::Done.is_terminal());
    }

    #[test]
    fn test_legal_transitions() {
        use VideoState::*;

        assert!(Pending.can_transition_to(FetchingMeta));
        assert!(FetchingMeta.can_transition_to(Skipped));
        assert!(FetchingMeta.can_transition_to(Failed));
        assert!(FetchingMeta.can_transition_to(FetchingComments));
        assert!(FetchingComments.can_transition_to(Done));
    }

    #[test]
    fn test_illegal_transitions() {
        use VideoState::*;

        assert!(!Pending.can_transition_to(Done));
        assert!(!FetchingComments.can_transition_to(Failed));
        assert!(!Done.can_transition_to(Pending));
        assert!(!Skipped.can_transition_to(FetchingComments));
    }

    #[test]
    fn test_display() {
        assert_eq!(VideoState::FetchingMeta.to_string(), "fetching_meta");
        assert_eq!(VideoState::Done.to_string(), "done");
    }
}
