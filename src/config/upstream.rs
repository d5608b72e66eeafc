//! Upstream Assistants API configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Default persona. Override with `ASSISTANT_RELAY__UPSTREAM__ASSISTANT_ID`.
const DEFAULT_ASSISTANT_ID: &str = "asst_J2SsEMfF2LzQCnmepffEbqnH";

/// Upstream API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// OpenAI API key. Optional at load time: a missing key is reported
    /// per-request as a configuration error, never as a startup crash.
    pub api_key: Option<Secret<String>>,

    /// Base URL for the Assistants API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Assistant to start runs against
    #[serde(default = "default_assistant_id")]
    pub assistant_id: String,

    /// Value for the `OpenAI-Beta` opt-in header
    #[serde(default = "default_beta_header")]
    pub beta_header: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate upstream configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.assistant_id.is_empty() {
            return Err(ValidationError::EmptyAssistantId);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            assistant_id: default_assistant_id(),
            beta_header: default_beta_header(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_assistant_id() -> String {
    DEFAULT_ASSISTANT_ID.to_string()
}

fn default_beta_header() -> String {
    "assistants=v2".to_string()
}

fn default_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_defaults() {
        let config = UpstreamConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.assistant_id, DEFAULT_ASSISTANT_ID);
        assert_eq!(config.beta_header, "assistants=v2");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_has_api_key() {
        let config = UpstreamConfig {
            api_key: Some(Secret::new("sk-xxx".to_string())),
            ..Default::default()
        };
        assert!(config.has_api_key());

        let config = UpstreamConfig {
            api_key: Some(Secret::new(String::new())),
            ..Default::default()
        };
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_validation_bad_base_url() {
        let config = UpstreamConfig {
            base_url: "api.openai.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_assistant_id() {
        let config = UpstreamConfig {
            assistant_id: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let config = UpstreamConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = UpstreamConfig {
            timeout_secs: 500,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(UpstreamConfig::default().validate().is_ok());
    }
}
