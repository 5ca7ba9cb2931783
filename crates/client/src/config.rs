//! # Client Configuration Module
//!
//! Loads settings for the slot client from environment variables.
//!
//! ## Environment Variables
//!
//! - `SLOTBOOK_API_URL`: Base URL of the recruiting backend (default: "http://localhost:8000")
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `SLOTBOOK_SESSION_FILE`: Where the signed-in identity is kept (default: ".slotbook-session.json")
//! - `SLOTBOOK_CONFLICT_SIGNAL`: `status` or `status-or-hint` (default: "status-or-hint")

use std::env;
use std::path::PathBuf;

use eyre::{Result, eyre};
use slotbook_core::errors::ConflictSignal;
use tracing::Level;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_SESSION_FILE: &str = ".slotbook-session.json";

/// Configuration for the slot client.
///
/// # Example
///
/// ```no_run
/// use slotbook_client::config::ClientConfig;
///
/// fn example() -> eyre::Result<()> {
///     let config = ClientConfig::from_env()?;
///     println!("Talking to {}", config.api_base_url);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without a trailing slash
    pub api_base_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// Session file path
    pub session_file: PathBuf,

    /// How booking conflicts are recognised
    pub conflict_signal: ConflictSignal,
}

impl ClientConfig {
    /// Creates a new ClientConfig from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is not an http(s) URL or the conflict
    /// signal is not one of the known values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("SLOTBOOK_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(eyre!(
                "SLOTBOOK_API_URL must start with http:// or https://, got {:?}",
                api_base_url
            ));
        }

        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        let session_file = lookup("SLOTBOOK_SESSION_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));

        let conflict_signal = match lookup("SLOTBOOK_CONFLICT_SIGNAL") {
            Some(raw) => ConflictSignal::parse(&raw)
                .ok_or_else(|| eyre!("Invalid SLOTBOOK_CONFLICT_SIGNAL value: {}", raw))?,
            None => ConflictSignal::default(),
        };

        Ok(Self {
            api_base_url,
            log_level,
            session_file,
            conflict_signal,
        })
    }
}
