use thiserror::Error;

/// Errors returned by the remote API boundary
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status}{}: {message}", fmt_reason(.reason))]
    Http {
        status: u16,
        reason: Option<String>,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid API key: {0}")]
    InvalidKey(String),
}

fn fmt_reason(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(" ({})", r))
        .unwrap_or_default()
}

/// Result type for remote API operations
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status code, when the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns a remediation hint for well-known key and quota problems
    pub fn diagnosis(&self) -> Option<&'static str> {
        let text = self.to_string().to_lowercase();

        if text.contains("quota") {
            Some("API quota exhausted: wait for the daily reset or use a key from another project")
        } else if text.contains("not enabled") || text.contains("has not been used") {
            Some("YouTube Data API v3 is not enabled: enable it under APIs & Services > Library")
        } else if self.status() == Some(403) || text.contains("forbidden") {
            Some("API key is restricted: remove the application restriction on the key and retry")
        } else if self.status() == Some(400) || text.contains("invalid") {
            Some("API key is invalid: check for stray whitespace or create a new key")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, reason: Option<&str>, message: &str) -> ApiError {
        ApiError::Http {
            status,
            reason: reason.map(str::to_string),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_display_includes_reason() {
        let err = http(403, Some("quotaExceeded"), "The request cannot be completed");
        assert_eq!(
            err.to_string(),
            "HTTP 403 (quotaExceeded): The request cannot be completed"
        );

        let err = http(500, None, "boom");
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn test_diagnosis() {
        assert!(http(403, Some("quotaExceeded"), "x")
            .diagnosis()
            .unwrap()
            .contains("quota"));
        assert!(http(403, Some("accessNotConfigured"), "API has not been used in project")
            .diagnosis()
            .unwrap()
            .contains("not enabled"));
        assert!(http(403, Some("forbidden"), "nope")
            .diagnosis()
            .unwrap()
            .contains("restricted"));
        assert!(http(400, Some("badRequest"), "API key not valid")
            .diagnosis()
            .unwrap()
            .contains("invalid"));
        assert!(http(500, None, "backend error").diagnosis().is_none());
    }
}
