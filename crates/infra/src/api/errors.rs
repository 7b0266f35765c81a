//! API-specific error types
//!
//! Classifies failures of the export API so callers can decide what to do
//! with them. Nothing in this crate retries on its own.

use std::time::Duration;

use peopleai_domain::{JobState, PeopleAiError};
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403, token exchange)
    Authentication,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except auth) and malformed responses
    Client,
    /// Network/connection errors and timeouts
    Network,
    /// Configuration errors
    Config,
    /// Local filesystem errors
    Io,
    /// The export job reached an unsuccessful terminal state
    Job,
    /// The caller cancelled the operation
    Cancelled,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Token exchange failed or the service answered 401/403
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// 5xx response
    #[error("Server error: {0}")]
    Server(String),

    /// Other non-success response
    #[error("Client error: {0}")]
    Client(String),

    /// Transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid client configuration or local setup
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller deadline expired
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Cancellation token fired
    #[error("Operation cancelled")]
    Cancelled,

    /// Required field absent from a response
    #[error("Malformed response: missing `{field}` in {context}")]
    MalformedResponse {
        /// Name of the missing field
        field: &'static str,
        /// Response it was expected in
        context: String,
    },

    /// Destination file could not be written
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Destination path
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Raised by the blocking status check when the job is Canceled or Failed
    #[error("Job state is {state}")]
    JobIncomplete {
        /// Terminal state the job ended in
        state: JobState,
    },
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Client(_) | Self::MalformedResponse { .. } => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) => ApiErrorCategory::Config,
            Self::Io { .. } => ApiErrorCategory::Io,
            Self::JobIncomplete { .. } => ApiErrorCategory::Job,
            Self::Cancelled => ApiErrorCategory::Cancelled,
        }
    }

    /// Terminal state carried by [`ApiError::JobIncomplete`]
    pub fn job_state(&self) -> Option<&JobState> {
        match self {
            Self::JobIncomplete { state } => Some(state),
            _ => None,
        }
    }
}

impl From<PeopleAiError> for ApiError {
    fn from(err: PeopleAiError) -> Self {
        match err {
            PeopleAiError::Network(message) => Self::Network(message),
            PeopleAiError::Auth(message) => Self::Auth(message),
            PeopleAiError::Config(message) => Self::Config(message),
            PeopleAiError::InvalidInput(message) => Self::Client(message),
            PeopleAiError::Internal(message) => Self::Config(message),
        }
    }
}
