//! Error types for the paper digest pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

use crate::config::api;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by Semantic Scholar API (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if a later attempt could succeed.
    ///
    /// Only reported; requests are never retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }

    /// HTTP status behind this error, if the remote end answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::BadRequest { .. } => Some(400),
            Self::Server { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Parse(_) => None,
        }
    }
}

/// The paper search call failed (transport failure or non-2xx response).
#[derive(thiserror::Error, Debug)]
#[error("{0}")]
pub struct SearchError(#[from] pub ClientError);

impl SearchError {
    /// The underlying client failure.
    #[must_use]
    pub const fn cause(&self) -> &ClientError {
        &self.0
    }
}

/// Lifecycle violations on a [`crate::models::Paper`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PaperError {
    /// Attribute access before the detail fetch ran.
    #[error("Data for paper {paper_id} has not been fetched yet")]
    NotFetched {
        /// Paper identifier
        paper_id: String,
    },

    /// A second fetch on a paper whose details are already attached.
    #[error("Paper {paper_id} has already been fetched")]
    AlreadyFetched {
        /// Paper identifier
        paper_id: String,
    },
}

/// A single paper's detail fetch failed.
#[derive(thiserror::Error, Debug)]
pub enum DetailFetchError {
    /// The detail request itself failed.
    #[error("Failed to fetch details for paper {paper_id}: {source}")]
    Request {
        /// Paper identifier
        paper_id: String,
        /// Underlying client failure
        source: ClientError,
    },

    /// The paper was not in a state that allows fetching.
    #[error(transparent)]
    Lifecycle(#[from] PaperError),
}

/// User input rejected before any request is made.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Search topic was empty after trimming.
    #[error("Please enter a topic.")]
    EmptyTopic,

    /// Requested paper count outside the allowed range.
    #[error("Number of papers must be between {min} and {max}, got {count}.", min = api::MIN_RESULTS, max = api::MAX_RESULTS)]
    CountOutOfRange {
        /// Requested count
        count: i64,
    },

    /// Question was empty after trimming.
    #[error("Please enter a question.")]
    EmptyQuestion,

    /// A question was asked before any papers were loaded.
    #[error("Search for papers before asking a question.")]
    NoResults,
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_retryable() {
        assert!(ClientError::rate_limited(60).is_retryable());
        assert!(ClientError::server(500, "Internal error").is_retryable());

        assert!(!ClientError::not_found("paper123").is_retryable());
        assert!(!ClientError::bad_request("invalid query").is_retryable());
    }

    #[test]
    fn test_client_error_status() {
        assert_eq!(ClientError::server(503, "down").status(), Some(503));
        assert_eq!(ClientError::rate_limited(1).status(), Some(429));
        assert_eq!(ClientError::not_found("x").status(), Some(404));
    }

    #[test]
    fn test_search_error_keeps_cause() {
        let err = SearchError::from(ClientError::server(500, "boom"));
        assert!(err.to_string().contains("500"));
        assert!(matches!(err.cause(), ClientError::Server { status: 500, .. }));
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::EmptyQuestion.to_string(), "Please enter a question.");
        let msg = ValidationError::CountOutOfRange { count: 11 }.to_string();
        assert!(msg.contains("between 1 and 10"));
        assert!(msg.contains("11"));
    }

    #[test]
    fn test_not_fetched_names_paper() {
        let err = PaperError::NotFetched { paper_id: "abc".into() };
        assert!(err.to_string().contains("abc"));
    }
}
