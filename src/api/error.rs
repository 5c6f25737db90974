//! Error types for requests against the forum backend.
//!
//! Three families matter to the views: transport/decoding failures,
//! non-2xx responses carrying an `{error}` body, and actions attempted
//! without a session (detected before any request is sent).

use thiserror::Error;

/// Errors produced by [`ForumClient`](super::ForumClient) and the session provider.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response body was not the JSON we expected.
    #[error("Invalid response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("{}", status_text(.status, .message))]
    Status { status: u16, message: Option<String> },

    /// The action needs a signed-in user and there is none.
    #[error("You need to log in first")]
    LoginRequired,

    /// Input rejected locally; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// The session user may not perform this action on this item.
    #[error("{0}")]
    Forbidden(String),
}

fn status_text(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Request failed with status {}", status),
    }
}

impl ApiError {
    /// Whether the backend rejected the request with a status code.
    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }

    /// HTTP status, when the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_backend_message() {
        let err = ApiError::Status {
            status: 403,
            message: Some("Not your post".to_string()),
        };
        assert_eq!(err.to_string(), "Not your post");
        assert_eq!(err.status(), Some(403));
        assert!(err.is_status());
    }

    #[test]
    fn status_without_message_mentions_code() {
        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "Request failed with status 500");
    }

    #[test]
    fn login_required_has_no_status() {
        assert_eq!(ApiError::LoginRequired.status(), None);
    }
}
