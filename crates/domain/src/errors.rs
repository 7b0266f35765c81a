//! Error types shared across the workspace

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for configuration and transport plumbing
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PeopleAiError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure or timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Rejected credentials
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Request that could not be built
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Local failure not covered above
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for People.ai operations
pub type Result<T> = std::result::Result<T, PeopleAiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        let err = PeopleAiError::Config("missing PEOPLEAI_API_KEY".into());
        assert_eq!(err.to_string(), "Configuration error: missing PEOPLEAI_API_KEY");
    }

    #[test]
    fn test_serializes_as_tagged_message() {
        let err = PeopleAiError::Network("connection refused".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Network");
        assert_eq!(json["message"], "connection refused");
    }
}
