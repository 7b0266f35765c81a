//! # People.ai Infrastructure
//!
//! Impure half of the export client.
//!
//! This crate contains:
//! - HTTP transport
//! - Client-credential token session
//! - Export API client (start, status, download)
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Depends on `peopleai-domain` for types
//! - Contains all I/O

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{ApiClient, ApiError, ApiErrorCategory};
pub use http::*;
