//! API authentication with client-credential tokens
//!
//! Exchanges the API key pair for a bearer token and caches it in an explicit
//! session holder. The token is refreshed whenever fewer than
//! [`TOKEN_REFRESH_THRESHOLD_SECS`] seconds of validity remain.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use peopleai_domain::constants::{AUTH_PATH, CLIENT_CREDENTIALS_GRANT, TOKEN_REFRESH_THRESHOLD_SECS};
use peopleai_domain::Credentials;
use reqwest::Method;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::errors::ApiError;
use crate::http::HttpClient;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    ///
    /// This method should handle token refresh if needed.
    async fn access_token(&self) -> Result<String, ApiError>;
}

/// Bearer token with the validity reported when it was issued
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    /// Value sent in the `Authorization: Bearer` header
    pub access_token: String,
    /// Lifetime in seconds as reported by the auth service
    pub expires_in: i64,
    /// When the token was received
    pub issued_at: DateTime<Utc>,
}

impl Token {
    /// Token issued at `issued_at`, valid for `expires_in` seconds
    pub fn new(access_token: impl Into<String>, expires_in: i64, issued_at: DateTime<Utc>) -> Self {
        Self { access_token: access_token.into(), expires_in, issued_at }
    }

    /// Seconds of validity left at `now`
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> i64 {
        self.expires_in - (now - self.issued_at).num_seconds()
    }

    /// Whether the token must be replaced before use at `now`
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.remaining_secs(now) < TOKEN_REFRESH_THRESHOLD_SECS
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Exchange client credentials for a bearer token
///
/// Posts `grant_type=client_credentials` with the key pair as form fields to
/// the auth path. The returned token is stamped with `now`.
///
/// # Errors
///
/// Returns [`ApiError::Auth`] on a non-success status,
/// [`ApiError::MalformedResponse`] when `access_token` or `expires_in` is
/// missing, and transport errors as-is. Nothing is retried.
#[instrument(skip(http, credentials), fields(api_key = %credentials.api_key))]
pub async fn fetch_token(
    http: &HttpClient,
    credentials: &Credentials,
    now: DateTime<Utc>,
) -> Result<Token, ApiError> {
    let url = credentials.url(AUTH_PATH);
    let form = [
        ("grant_type", CLIENT_CREDENTIALS_GRANT),
        ("client_id", credentials.api_key.as_str()),
        ("client_secret", credentials.api_secret.as_str()),
    ];

    debug!(url = %url, "Requesting access token");

    let response = http.send(http.request(Method::POST, &url).form(&form)).await?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(format!("Failed to read token response: {}", e)))?;

    if !status.is_success() {
        return Err(ApiError::Auth(format!("{} returned status {}: {}", url, status, body)));
    }

    let value: Value = serde_json::from_str(&body)
        .map_err(|e| ApiError::Auth(format!("Token response is not JSON: {}", e)))?;

    let access_token = value.get("access_token").and_then(Value::as_str).ok_or_else(|| {
        ApiError::MalformedResponse { field: "access_token", context: "token response".into() }
    })?;
    // Fractional lifetimes are truncated to whole seconds
    #[allow(clippy::cast_possible_truncation)]
    let expires_in = value
        .get("expires_in")
        .and_then(Value::as_f64)
        .map(|secs| secs as i64)
        .ok_or_else(|| ApiError::MalformedResponse {
            field: "expires_in",
            context: "token response".into(),
        })?;

    info!(expires_in, "Obtained access token");
    Ok(Token::new(access_token, expires_in, now))
}

/// Cached client-credential session
///
/// Starts empty and fetches a token on first use. The lock is held across a
/// refresh so concurrent callers sharing the session trigger one exchange.
pub struct TokenSession {
    http: HttpClient,
    credentials: Credentials,
    token: Mutex<Option<Token>>,
}

impl TokenSession {
    /// Empty session; the first call fetches a token
    pub fn new(http: HttpClient, credentials: Credentials) -> Self {
        Self { http, credentials, token: Mutex::new(None) }
    }

    /// Get an access token valid at `now`, refreshing if needed
    ///
    /// # Errors
    ///
    /// Propagates any failure of [`fetch_token`].
    pub async fn access_token_at(&self, now: DateTime<Utc>) -> Result<String, ApiError> {
        let mut guard = self.token.lock().await;

        if let Some(token) = guard.as_ref().filter(|token| !token.needs_refresh(now)) {
            return Ok(token.access_token.clone());
        }

        let token = fetch_token(&self.http, &self.credentials, now).await?;
        let access_token = token.access_token.clone();
        *guard = Some(token);
        Ok(access_token)
    }

    /// Currently cached token, if any
    pub async fn current_token(&self) -> Option<Token> {
        self.token.lock().await.clone()
    }

    /// Seed the session with a known token
    pub async fn store(&self, token: Token) {
        *self.token.lock().await = Some(token);
    }

    /// Drop the cached token so the next call re-authenticates
    pub async fn invalidate(&self) {
        *self.token.lock().await = None;
    }
}

#[async_trait]
impl AccessTokenProvider for TokenSession {
    async fn access_token(&self) -> Result<String, ApiError> {
        self.access_token_at(Utc::now()).await
    }
}
