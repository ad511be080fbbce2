//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export URL_STORAGE_ADDRESS="url-storage:50051"
//! export URL_STORAGE_RETRIES="3"
//! ```
//!
//! ## Required Variables
//!
//! - `URL_STORAGE_ADDRESS` - Remote storage service address (`host:port` or URI)
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `HTTP_REQUEST_TIMEOUT_MS` - Deadline for storage calls made by a request (default: 4000)
//! - `URL_STORAGE_TIMEOUT_MS` - Dial and per-attempt timeout (default: 5000)
//! - `URL_STORAGE_RETRIES` - Attempts per call, 1 to 10 (default: 3)
//! - `URL_STORAGE_RETRY_BACKOFF_MS` - Pause between attempts (default: 50)

use anyhow::{Context, Result};
use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::url_storage::RetryPolicy;

/// Upper bound for `URL_STORAGE_RETRIES`.
pub const MAX_STORAGE_ATTEMPTS: u32 = 10;

/// Connection settings for the remote URL storage service.
///
/// Shared by the HTTP server and the `admin` CLI.
#[derive(Debug, Clone)]
pub struct UrlStorageConfig {
    pub address: String,
    /// Dial timeout, also used as the per-attempt timeout (`URL_STORAGE_TIMEOUT_MS`).
    pub timeout_ms: u64,
    /// Total attempts per call (`URL_STORAGE_RETRIES`).
    pub retries: u32,
    pub retry_backoff_ms: u64,
}

impl UrlStorageConfig {
    /// Loads storage settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `URL_STORAGE_ADDRESS` is missing or a numeric
    /// variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let address =
            env::var("URL_STORAGE_ADDRESS").context("URL_STORAGE_ADDRESS must be set")?;

        Ok(Self {
            address,
            timeout_ms: parse_var("URL_STORAGE_TIMEOUT_MS", 5000)?,
            retries: parse_var("URL_STORAGE_RETRIES", 3)?,
            retry_backoff_ms: parse_var("URL_STORAGE_RETRY_BACKOFF_MS", 50)?,
        })
    }

    /// Validates the storage settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `address` is empty
    /// - `timeout_ms` is 0
    /// - `retries` is outside `1..=10`
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            anyhow::bail!("URL_STORAGE_ADDRESS must not be empty");
        }

        if self.timeout_ms == 0 {
            anyhow::bail!("URL_STORAGE_TIMEOUT_MS must be greater than 0");
        }

        if self.retries == 0 || self.retries > MAX_STORAGE_ATTEMPTS {
            anyhow::bail!(
                "URL_STORAGE_RETRIES must be between 1 and {}, got {}",
                MAX_STORAGE_ATTEMPTS,
                self.retries
            );
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Builds the gateway retry policy.
    ///
    /// # Errors
    ///
    /// Returns an error if `retries` is 0.
    pub fn retry_policy(&self) -> Result<RetryPolicy> {
        let max_attempts =
            NonZeroU32::new(self.retries).context("URL_STORAGE_RETRIES must be at least 1")?;

        Ok(RetryPolicy::new(max_attempts, self.timeout())
            .with_backoff(Duration::from_millis(self.retry_backoff_ms)))
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Deadline given to each storage call made while serving one HTTP request.
    pub http_request_timeout_ms: u64,
    pub url_storage: UrlStorageConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required storage configuration is missing.
    pub fn from_env() -> Result<Self> {
        let url_storage =
            UrlStorageConfig::from_env().context("Failed to load url storage configuration")?;

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        let http_request_timeout_ms = parse_var("HTTP_REQUEST_TIMEOUT_MS", 4000)?;

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            http_request_timeout_ms,
            url_storage,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `http_request_timeout_ms` is 0
    /// - the storage settings are invalid
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.http_request_timeout_ms == 0 {
            anyhow::bail!("HTTP_REQUEST_TIMEOUT_MS must be greater than 0");
        }

        self.url_storage.validate()
    }

    pub fn http_request_timeout(&self) -> Duration {
        Duration::from_millis(self.http_request_timeout_ms)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  URL storage: {}", self.url_storage.address);
        tracing::info!(
            "  URL storage timeout: {}ms, attempts: {}, backoff: {}ms",
            self.url_storage.timeout_ms,
            self.url_storage.retries,
            self.url_storage.retry_backoff_ms
        );
        tracing::info!("  HTTP request timeout: {}ms", self.http_request_timeout_ms);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value '{value}'")),
        Err(_) => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
