//! OpenAI Assistants Client - reqwest implementation of the AssistantClient port.
//!
//! Each port operation maps to exactly one HTTP request against the
//! Assistants API. Every request carries the bearer key, a JSON content
//! type, and the `OpenAI-Beta` opt-in header the API version requires.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiClientConfig::new(api_key)
//!     .with_base_url("https://api.openai.com/v1")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let client = OpenAiAssistantClient::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde_json::{json, Value};
use std::time::Duration;

use crate::ports::{AssistantClient, UpstreamError};

/// Configuration for the OpenAI Assistants client.
#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Value for the `OpenAI-Beta` header.
    pub beta_header: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAiClientConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.openai.com/v1".to_string(),
            beta_header: "assistants=v2".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the `OpenAI-Beta` header value.
    pub fn with_beta_header(mut self, value: impl Into<String>) -> Self {
        self.beta_header = value.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI Assistants API client.
pub struct OpenAiAssistantClient {
    config: OpenAiClientConfig,
    client: Client,
}

impl OpenAiAssistantClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: OpenAiClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn threads_url(&self) -> String {
        format!("{}/threads", self.config.base_url)
    }

    fn messages_url(&self, thread_id: &str) -> String {
        format!("{}/threads/{}/messages", self.config.base_url, thread_id)
    }

    fn runs_url(&self, thread_id: &str) -> String {
        format!("{}/threads/{}/runs", self.config.base_url, thread_id)
    }

    fn run_url(&self, thread_id: &str, run_id: &str) -> String {
        format!(
            "{}/threads/{}/runs/{}",
            self.config.base_url, thread_id, run_id
        )
    }

    /// Sends a POST with the fixed header set and returns the parsed body.
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .header("OpenAI-Beta", &self.config.beta_header)
            .json(body)
            .send()
            .await
            .map_err(map_send_error)?;

        Self::parse_response(response).await
    }

    /// Sends a GET with the fixed header set and returns the parsed body.
    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .header("OpenAI-Beta", &self.config.beta_header)
            .send()
            .await
            .map_err(map_send_error)?;

        Self::parse_response(response).await
    }

    /// Checks the response status and parses the JSON body.
    ///
    /// Non-2xx bodies are kept verbatim (parsed as JSON when they are JSON)
    /// so the caller can report exactly what upstream said.
    async fn parse_response(response: Response) -> Result<Value, UpstreamError> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body =
                serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text));
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl AssistantClient for OpenAiAssistantClient {
    async fn create_thread(&self) -> Result<String, UpstreamError> {
        let body = self.post_json(&self.threads_url(), &json!({})).await?;
        extract_str(&body, "id")
    }

    async fn add_message(&self, thread_id: &str, content: &str) -> Result<String, UpstreamError> {
        let body = self
            .post_json(&self.messages_url(thread_id), &message_body(content))
            .await?;
        extract_str(&body, "id")
    }

    async fn start_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<String, UpstreamError> {
        let body = self
            .post_json(&self.runs_url(thread_id), &run_body(assistant_id))
            .await?;
        extract_str(&body, "id")
    }

    async fn run_status(&self, thread_id: &str, run_id: &str) -> Result<String, UpstreamError> {
        let body = self.get_json(&self.run_url(thread_id, run_id)).await?;
        extract_str(&body, "status")
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Value>, UpstreamError> {
        let body = self.get_json(&self.messages_url(thread_id)).await?;
        match body.get("data") {
            Some(Value::Array(items)) => Ok(items.clone()),
            _ => Err(UpstreamError::MalformedResponse(
                "response has no data array".to_string(),
            )),
        }
    }
}

/// Body for posting a user message into a thread.
fn message_body(content: &str) -> Value {
    json!({ "role": "user", "content": content })
}

/// Body for starting a run.
fn run_body(assistant_id: &str) -> Value {
    json!({ "assistant_id": assistant_id })
}

/// Pulls a required string field out of an upstream response body.
fn extract_str(body: &Value, field: &str) -> Result<String, UpstreamError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            UpstreamError::MalformedResponse(format!("response has no {field} field"))
        })
}

fn map_send_error(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Network(format!("Request timed out: {}", e))
    } else if e.is_connect() {
        UpstreamError::Network(format!("Connection failed: {}", e))
    } else {
        UpstreamError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_builder_works() {
        let config = OpenAiClientConfig::new("test-key")
            .with_base_url("https://custom.api.com/v1")
            .with_beta_header("assistants=v1")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.base_url, "https://custom.api.com/v1");
        assert_eq!(config.beta_header, "assistants=v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn url_construction() {
        let client = OpenAiAssistantClient::new(OpenAiClientConfig::new("test"));

        assert_eq!(client.threads_url(), "https://api.openai.com/v1/threads");
        assert_eq!(
            client.messages_url("thread_abc"),
            "https://api.openai.com/v1/threads/thread_abc/messages"
        );
        assert_eq!(
            client.runs_url("thread_abc"),
            "https://api.openai.com/v1/threads/thread_abc/runs"
        );
        assert_eq!(
            client.run_url("thread_abc", "run_1"),
            "https://api.openai.com/v1/threads/thread_abc/runs/run_1"
        );
    }

    #[test]
    fn message_body_is_user_role() {
        assert_eq!(
            message_body("hello"),
            json!({ "role": "user", "content": "hello" })
        );
    }

    #[test]
    fn run_body_carries_assistant_id() {
        assert_eq!(run_body("asst_123"), json!({ "assistant_id": "asst_123" }));
    }

    #[test]
    fn extract_str_finds_field() {
        let body = json!({ "id": "thread_abc", "object": "thread" });
        assert_eq!(extract_str(&body, "id").unwrap(), "thread_abc");
    }

    #[test]
    fn extract_str_reports_missing_field() {
        let body = json!({ "object": "thread" });
        let err = extract_str(&body, "id").unwrap_err();
        assert!(matches!(err, UpstreamError::MalformedResponse(_)));
    }
}
