//! Error handling for the BabyTracker client

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error body returned by the BabyTracker API.
///
/// The server reports failures as a JSON object with at least an `error`
/// message. Anything else it includes is kept in `extra`. When a response
/// body is not valid JSON at all, the raw body becomes the `error` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Human-readable error message, when the server supplied one
    pub error: Option<String>,

    /// Any additional fields from the error body
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ErrorPayload {
    /// Parse an error payload from a raw response body, falling back to
    /// `{"error": "<body>"}` when the body is not valid JSON.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| ErrorPayload {
            error: Some(body.to_string()),
            extra: serde_json::Map::new(),
        })
    }

    /// The server-supplied message, if any
    pub fn message(&self) -> &str {
        self.error.as_deref().unwrap_or("unknown error")
    }
}

/// Unified error type for the BabyTracker client
#[derive(Error, Debug)]
pub enum Error {
    /// Any non-success HTTP response, with the parsed error body
    #[error("API error: {} (status {status})", .payload.message())]
    Api {
        status: StatusCode,
        payload: ErrorPayload,
    },

    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// An entry payload carried a missing or unrecognised `entry_type` tag
    #[error("unknown entry type {0:?}")]
    UnknownEntryType(String),

    /// A session operation was attempted before endpoint discovery
    #[error("client not initialized: call initialize() to discover endpoints")]
    NotInitialized,

    /// A remote operation was attempted on an entity that has no URL yet
    #[error("entity has no URL: it has not been saved to the server")]
    NotPersisted,
}

impl Error {
    /// The HTTP status of an API failure, if this is one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is an authentication failure (HTTP 401).
    ///
    /// The UI treats these differently from other failures, showing a
    /// login-specific message instead of a generic error.
    pub fn is_auth_failure(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_parses_json_body() {
        let payload = ErrorPayload::from_body(r#"{"error": "Invalid credentials"}"#);
        assert_eq!(payload.message(), "Invalid credentials");
        assert!(payload.extra.is_empty());
    }

    #[test]
    fn payload_keeps_extra_fields() {
        let payload = ErrorPayload::from_body(r#"{"error": "nope", "code": 17}"#);
        assert_eq!(payload.message(), "nope");
        assert_eq!(payload.extra["code"], 17);
    }

    #[test]
    fn payload_falls_back_to_raw_body() {
        let payload = ErrorPayload::from_body("<html>502 Bad Gateway</html>");
        assert_eq!(payload.message(), "<html>502 Bad Gateway</html>");
    }

    #[test]
    fn auth_failure_is_distinguished() {
        let err = Error::Api {
            status: StatusCode::UNAUTHORIZED,
            payload: ErrorPayload::from_body("{}"),
        };
        assert!(err.is_auth_failure());
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

        let err = Error::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            payload: ErrorPayload::from_body("boom"),
        };
        assert!(!err.is_auth_failure());
    }
}
