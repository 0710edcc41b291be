//! # Client Configuration Module
//!
//! Loads the settings the SportZone client needs to reach the booking
//! backend from environment variables, with defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `SPORTZONE_API_URL`: Base URL of the booking backend (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for talking to the booking backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without a trailing slash (e.g., "http://localhost:8080")
    pub api_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl ClientConfig {
    /// Configuration for `api_url` with default logging and timeout.
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            log_level: Level::INFO,
            request_timeout: 30,
        }
    }

    /// Creates a new ClientConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if the SPORTZONE_API_URL
    /// environment variable is not set.
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("SPORTZONE_API_URL")
            .wrap_err("SPORTZONE_API_URL environment variable must be set")?;

        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(Self {
            log_level,
            request_timeout,
            ..Self::new(&api_url)
        })
    }

    /// Joins `path` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

/// Unknown levels fall back to INFO.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
