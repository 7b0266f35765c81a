//! People.ai API client
//!
//! This module provides the HTTP-based client for the activities export API.
//! It handles client-credential authentication, the authenticated request
//! primitive, and the export job lifecycle.
//!
//! # Architecture
//!
//! - Uses [`crate::http::HttpClient`] (no direct reqwest client construction)
//! - Token session refreshed when under 10 seconds of validity remain
//! - Single attempt per request; only the status poll loops
//! - Structured tracing only; secrets and tokens are never logged

pub mod auth;
pub mod client;
pub mod errors;
pub mod exports;

pub use auth::{fetch_token, AccessTokenProvider, Token, TokenSession};
pub use client::{ApiClient, ApiClientBuilder};
pub use errors::{ApiError, ApiErrorCategory};
