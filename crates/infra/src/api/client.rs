//! Authenticated request primitive for the People.ai API
//!
//! Every call checks the token session first, then sends the request with a
//! JSON body and a bearer header. Bodies that are not a single JSON document
//! (JSONLines exports) come back as raw text.

use std::sync::Arc;
use std::time::Duration;

use peopleai_domain::{ApiResponse, ClientConfig, Credentials};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, instrument};

use super::auth::{AccessTokenProvider, TokenSession};
use super::errors::ApiError;
use crate::http::HttpClient;

/// People.ai API client
///
/// Holds the credentials and the token session. One logical caller at a
/// time is expected, though the session itself is lock-protected.
pub struct ApiClient {
    http_client: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    credentials: Credentials,
    poll_interval: Duration,
}

impl ApiClient {
    /// Create a new API client authenticating with client credentials
    ///
    /// No network calls are made until the first request.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http_client = Self::build_http(&config)?;
        let auth = Arc::new(TokenSession::new(http_client.clone(), config.credentials.clone()));

        Ok(Self::assemble(http_client, auth, &config))
    }

    /// Create a client for the given key pair
    ///
    /// `api_endpoint` defaults to `https://api.people.ai`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created
    pub fn from_keys(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        api_endpoint: Option<String>,
    ) -> Result<Self, ApiError> {
        let mut credentials = Credentials::new(api_key, api_secret);
        if let Some(endpoint) = api_endpoint {
            credentials = credentials.with_endpoint(endpoint);
        }
        Self::new(ClientConfig::new(credentials))
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    fn build_http(config: &ClientConfig) -> Result<HttpClient, ApiError> {
        let mut builder = HttpClient::builder().timeout(config.timeout());
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build().map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {}", e)))
    }

    fn assemble(
        http_client: HttpClient,
        auth: Arc<dyn AccessTokenProvider>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            http_client,
            auth,
            credentials: config.credentials.clone(),
            poll_interval: config.poll_interval(),
        }
    }

    /// Credentials the client authenticates with
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Default delay between status polls
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Send an authenticated request and return the body as text
    ///
    /// # Errors
    ///
    /// Returns error if authentication or the request fails, or the service
    /// answers with a non-success status
    pub async fn request_text<T>(
        &self,
        method: Method,
        path: &str,
        params: Option<&T>,
    ) -> Result<String, ApiError>
    where
        T: Serialize + ?Sized,
    {
        let response = self.send_checked(method, path, params).await?;
        response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {}", e)))
    }

    /// Send an authenticated request and return the body bytes untouched
    ///
    /// Unlike [`ApiClient::request_text`] nothing is decoded, so a byte-order
    /// mark or non-UTF-8 content survives as sent.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::request_text`]
    pub async fn request_bytes<T>(
        &self,
        method: Method,
        path: &str,
        params: Option<&T>,
    ) -> Result<Vec<u8>, ApiError>
    where
        T: Serialize + ?Sized,
    {
        let response = self.send_checked(method, path, params).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {}", e)))?;
        Ok(body.to_vec())
    }

    /// Send an authenticated request and decode the body
    ///
    /// A body that is valid JSON is returned parsed; anything else (such as
    /// JSONLines output) is returned as the exact original text.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::request_text`]; a body that fails to decode is
    /// not an error
    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        params: Option<&T>,
    ) -> Result<ApiResponse, ApiError>
    where
        T: Serialize + ?Sized,
    {
        let body = self.request_text(method, path, params).await?;
        Ok(ApiResponse::from_body(body))
    }

    /// Execute a GET request, with an optional JSON body
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::request`]
    pub async fn get<T>(&self, path: &str, params: Option<&T>) -> Result<ApiResponse, ApiError>
    where
        T: Serialize + ?Sized,
    {
        self.request(Method::GET, path, params).await
    }

    /// Execute a POST request, with an optional JSON body
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::request`]
    pub async fn post<T>(&self, path: &str, params: Option<&T>) -> Result<ApiResponse, ApiError>
    where
        T: Serialize + ?Sized,
    {
        self.request(Method::POST, path, params).await
    }

    #[instrument(skip(self, params), fields(method = %method, path = %path))]
    async fn send_checked<T>(
        &self,
        method: Method,
        path: &str,
        params: Option<&T>,
    ) -> Result<Response, ApiError>
    where
        T: Serialize + ?Sized,
    {
        let token = self.auth.access_token().await?;
        let url = self.credentials.url(path);

        debug!(url = %url, "API request");

        let mut request = self.http_client.request(method, &url).bearer_auth(token);
        if let Some(params) = params {
            request = request.json(params);
        }

        let response = self.http_client.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status_error(status, &url, body));
        }

        debug!(url = %url, status = %status, "API request successful");
        Ok(response)
    }

    fn map_status_error(status: StatusCode, url: &str, body: String) -> ApiError {
        let message = if body.is_empty() {
            format!("{} returned status {}", url, status)
        } else {
            format!("{} returned status {}: {}", url, status, body)
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            ApiError::Auth(message)
        } else if status.is_server_error() {
            ApiError::Server(message)
        } else if status.is_client_error() {
            ApiError::Client(message)
        } else {
            ApiError::Network(message)
        }
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ClientConfig>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
}

impl ApiClientBuilder {
    /// Set the client configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the client-credential session with another token provider
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if no configuration was set or client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.ok_or_else(|| ApiError::Config("Client config not set".into()))?;

        match self.auth {
            Some(auth) => {
                let http_client = ApiClient::build_http(&config)?;
                Ok(ApiClient::assemble(http_client, auth, &config))
            }
            None => ApiClient::new(config),
        }
    }
}
