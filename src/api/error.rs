//! Error types for inventory service calls.

use thiserror::Error;

/// Errors that can occur while talking to the inventory service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL '{base_url}' cannot be used for API requests")]
    InvalidBaseUrl { base_url: String },

    /// HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Request never produced a response (DNS, connect, TLS, timeout).
    #[error("Request to '{url}' failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Service answered with a non-success status.
    #[error("Service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON shape.
    #[error("Invalid response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request could not be handed to the background worker.
    #[error("Request was not sent: {reason}")]
    NotSent { reason: String },
}

impl ApiError {
    /// HTTP status if the service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            ApiError::Connection { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}`, `{"error": "..."}` and
/// `{"error": {"message": "..."}}`; otherwise returns the trimmed body, or
/// `fallback` when the body is empty.
pub(crate) fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let candidates = [
            value.get("detail"),
            value.get("error"),
            value.get("error").and_then(|e| e.get("message")),
            value.get("message"),
        ];
        for candidate in candidates.into_iter().flatten() {
            if let Some(text) = candidate.as_str() {
                return text.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
