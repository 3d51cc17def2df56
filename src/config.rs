//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. A `.env` file in the working directory is read first (see
//! `main.rs`).
//!
//! ```bash
//! export API_URL="https://student-khabri-backend-1.onrender.com/api"
//! export LISTEN="0.0.0.0:3000"
//! ```
//!
//! ## Variables
//!
//! - `API_URL` - Base URL of the leads backend, including the `/api` prefix
//!   (default: [`DEFAULT_API_URL`])
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `COOKIE_SECURE` - `true`/`1` marks the session cookie `Secure`
//!   (default: off)

use anyhow::{Context, Result};
use std::env;
use url::Url;

/// Backend used when `API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://student-khabri-backend-1.onrender.com/api";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Set behind TLS so browsers only send the session cookie over HTTPS.
    pub cookie_secure: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Every variable has a default, so this only fails on values that are
    /// not valid unicode.
    pub fn from_env() -> Result<Self> {
        let api_url = Self::var_or("API_URL", DEFAULT_API_URL)?;
        let listen_addr = Self::var_or("LISTEN", "0.0.0.0:3000")?;
        let log_level = Self::var_or("RUST_LOG", "info")?;
        let log_format = Self::var_or("LOG_FORMAT", "text")?;

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            api_url,
            listen_addr,
            log_level,
            log_format,
            cookie_secure,
        })
    }

    fn var_or(name: &str, default: &str) -> Result<String> {
        match env::var(name) {
            Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            Ok(_) | Err(env::VarError::NotPresent) => Ok(default.to_string()),
            Err(e) => Err(e).with_context(|| format!("{name} is not valid unicode")),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `api_url` is not an absolute `http`/`https` URL
    /// - `listen_addr` has no port
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        let api_url = Url::parse(&self.api_url)
            .with_context(|| format!("API_URL is not a valid URL: '{}'", self.api_url))?;
        if api_url.scheme() != "http" && api_url.scheme() != "https" {
            anyhow::bail!(
                "API_URL must start with 'http://' or 'https://', got '{}'",
                self.api_url
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Backend API: {}", self.api_url);
        tracing::info!("  Secure cookie: {}", self.cookie_secure);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is unreadable or validation fails.
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
