//! # People.ai Domain
//!
//! Types shared by the export client.
//!
//! This crate contains:
//! - Credentials and client configuration
//! - Export parameters, job ids and job states
//! - Domain error types and Result definitions
//! - API paths and defaults
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
