//! Client configuration structures

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_ENDPOINT, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS};

/// API key pair and the endpoint it is valid for
///
/// Immutable once built. The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Public identifier for the API key
    pub api_key: String,
    /// Secret only known to the application and authorization server
    pub api_secret: String,
    /// People.ai API endpoint
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
}

impl Credentials {
    /// Create credentials for the default People.ai endpoint
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_endpoint: default_api_endpoint(),
        }
    }

    /// Point the credentials at a different API endpoint
    #[must_use]
    pub fn with_endpoint(mut self, api_endpoint: impl Into<String>) -> Self {
        self.api_endpoint = api_endpoint.into();
        self
    }

    /// Absolute URL for an API path (e.g. `/auth/v1/tokens`)
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_endpoint.trim_end_matches('/'), path)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("api_endpoint", &self.api_endpoint)
            .finish()
    }
}

/// Configuration for the API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Key pair and endpoint
    #[serde(flatten)]
    pub credentials: Credentials,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Delay between status polls in seconds
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Optional `User-Agent` header value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Configuration with default timeout and poll interval
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            user_agent: None,
        }
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Delay between status polls
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

fn default_api_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}
