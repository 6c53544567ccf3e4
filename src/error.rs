//! Error types for the Tracker client
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the Tracker client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Decode Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Invalid pagination header '{header}': {message}")]
    PaginationHeader { header: String, message: String },

    // ============================================================================
    // Request Validation Errors
    // ============================================================================
    #[error("Required field not set: {field}")]
    MissingField { field: String },
}

impl Error {
    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a pagination header error
    pub fn pagination_header(header: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PaginationHeader {
            header: header.into(),
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Classify an error raised while reading a response body
    ///
    /// A malformed JSON body is a decode error, not a transport fault:
    /// reissuing the request would deterministically fail the same way.
    pub(crate) fn from_body(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode {
                message: e.to_string(),
            }
        } else {
            Self::Http(e)
        }
    }

    /// Check if this error is retryable by the caller
    ///
    /// The client never retries on its own; a failed page fetch leaves the
    /// cursor untouched, so callers can safely reissue these.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for the Tracker client
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::pagination_header("X-Tracker-Pagination-Total", "missing");
        assert_eq!(
            err.to_string(),
            "Invalid pagination header 'X-Tracker-Pagination-Total': missing"
        );

        let err = Error::missing_field("description");
        assert_eq!(err.to_string(), "Required field not set: description");
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::http_status(429, "").is_retryable());
        assert!(Error::http_status(500, "").is_retryable());
        assert!(Error::http_status(503, "").is_retryable());

        assert!(!Error::http_status(400, "").is_retryable());
        assert!(!Error::http_status(401, "").is_retryable());
        assert!(!Error::http_status(404, "").is_retryable());
        assert!(!Error::missing_field("name").is_retryable());
        assert!(!Error::pagination_header("X-Tracker-Pagination-Limit", "bad").is_retryable());
        assert!(!Error::decode("malformed body").is_retryable());
    }
}
