//! API constants
//!
//! Paths and defaults of the People.ai REST API.

// Endpoint and paths
/// Production API base URL
pub const DEFAULT_API_ENDPOINT: &str = "https://api.people.ai";
/// Client-credential token exchange
pub const AUTH_PATH: &str = "/auth/v1/tokens";
/// Activities export jobs collection
pub const EXPORT_ACTIVITIES_PATH: &str = "/pull/v1/export/activities/jobs";

// Token handling
/// OAuth2 grant type sent with the key pair
pub const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";
/// A token with less validity left than this is replaced before use
pub const TOKEN_REFRESH_THRESHOLD_SECS: i64 = 10;

// Transport and polling defaults
/// Per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Delay between status polls
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
