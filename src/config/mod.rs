//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ASSISTANT_RELAY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use assistant_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod server;
mod upstream;

pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use upstream::UpstreamConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Assistants API configuration (key, base URL, assistant id)
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `ASSISTANT_RELAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `ASSISTANT_RELAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ASSISTANT_RELAY__UPSTREAM__API_KEY=sk-...` -> `upstream.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    /// A missing API key is not a load error; it surfaces per-request.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ASSISTANT_RELAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.upstream.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
