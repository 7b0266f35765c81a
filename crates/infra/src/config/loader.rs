//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Uses environment variables when a credential variable is set
//! 2. Otherwise falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PEOPLEAI_API_KEY`: Public identifier for the API key (required)
//! - `PEOPLEAI_API_SECRET`: API secret (required)
//! - `PEOPLEAI_API_ENDPOINT`: API base URL (default `https://api.people.ai`)
//! - `PEOPLEAI_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `PEOPLEAI_POLL_INTERVAL_SECS`: Delay between status polls in seconds
//! - `PEOPLEAI_USER_AGENT`: Optional `User-Agent` header
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./peopleai.json` or `./peopleai.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. Relative to executable location

use std::path::{Path, PathBuf};

use peopleai_domain::{ClientConfig, Credentials, PeopleAiError, Result};

use crate::errors::InfraError;

/// Public identifier for the API key
pub const ENV_API_KEY: &str = "PEOPLEAI_API_KEY";
/// API secret
pub const ENV_API_SECRET: &str = "PEOPLEAI_API_SECRET";
/// API base URL
pub const ENV_API_ENDPOINT: &str = "PEOPLEAI_API_ENDPOINT";
/// Per-request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "PEOPLEAI_TIMEOUT_SECS";
/// Delay between status polls in seconds
pub const ENV_POLL_INTERVAL_SECS: &str = "PEOPLEAI_POLL_INTERVAL_SECS";
/// `User-Agent` header value
pub const ENV_USER_AGENT: &str = "PEOPLEAI_USER_AGENT";

/// Load configuration with automatic fallback strategy
///
/// Uses environment variables when either credential variable is set, and
/// falls back to a config file only when neither is. Once the environment
/// is chosen its errors are returned as-is.
///
/// # Errors
/// Returns `PeopleAiError::Config` if:
/// - A credential variable is set but the other is missing
/// - An optional variable has an invalid value
/// - No config file is found, or its format is invalid
pub fn load() -> Result<ClientConfig> {
    load_with(|key| std::env::var(key).ok(), load_from_file)
}

fn load_with<F, L>(lookup: F, load_file: L) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
    L: FnOnce(Option<PathBuf>) -> Result<ClientConfig>,
{
    let has_credentials = [ENV_API_KEY, ENV_API_SECRET]
        .iter()
        .any(|key| lookup(key).is_some_and(|value| !value.is_empty()));

    if !has_credentials {
        tracing::debug!("No credentials in environment, trying file");
        return load_file(None);
    }

    let config = load_from_vars(lookup)?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// See module documentation for the variables read.
///
/// # Errors
/// Returns `PeopleAiError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<ClientConfig> {
    load_from_vars(|key| std::env::var(key).ok())
}

/// Build configuration from an arbitrary variable lookup
///
/// # Errors
/// Same as [`load_from_env`].
pub fn load_from_vars<F>(lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| {
        lookup(key).filter(|v| !v.is_empty()).ok_or_else(|| {
            PeopleAiError::Config(format!("Missing required environment variable: {}", key))
        })
    };

    let mut credentials = Credentials::new(required(ENV_API_KEY)?, required(ENV_API_SECRET)?);
    if let Some(endpoint) = lookup(ENV_API_ENDPOINT).filter(|v| !v.is_empty()) {
        credentials = credentials.with_endpoint(endpoint);
    }

    let mut config = ClientConfig::new(credentials);

    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        config.timeout_secs = parse_secs(ENV_TIMEOUT_SECS, &raw)?;
    }
    if let Some(raw) = lookup(ENV_POLL_INTERVAL_SECS) {
        config.poll_interval_secs = parse_secs(ENV_POLL_INTERVAL_SECS, &raw)?;
    }
    config.user_agent = lookup(ENV_USER_AGENT).filter(|v| !v.is_empty());

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PeopleAiError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PeopleAiError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PeopleAiError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents =
        std::fs::read_to_string(&config_path).map_err(|e| PeopleAiError::from(InfraError::from(e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PeopleAiError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PeopleAiError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(PeopleAiError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(config_candidates(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(config_candidates(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn config_candidates(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("peopleai.json"),
        dir.join("peopleai.toml"),
        dir.join("config.json"),
        dir.join("config.toml"),
    ]
}

fn parse_secs(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| PeopleAiError::Config(format!("Invalid value for {}: {}", key, e)))
}
