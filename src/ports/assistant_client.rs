//! Assistant Client Port - Interface to the upstream Assistants API.
//!
//! This port abstracts the five upstream operations the relay forwards, so
//! the HTTP layer can be exercised against a mock without network access.
//! Thread, message, and run identifiers are opaque strings minted by the
//! upstream; the relay never stores or interprets them.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Port for upstream Assistants API calls.
///
/// Implementations translate each operation into exactly one HTTP request
/// against the upstream API. No operation retries or fans out.
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Create a new empty thread. Returns the upstream thread id.
    async fn create_thread(&self) -> Result<String, UpstreamError>;

    /// Append a user-role message to a thread. Returns the message id.
    async fn add_message(&self, thread_id: &str, content: &str) -> Result<String, UpstreamError>;

    /// Start a run of the given assistant on a thread. Returns the run id.
    async fn start_run(&self, thread_id: &str, assistant_id: &str)
        -> Result<String, UpstreamError>;

    /// Fetch the current status of a run (e.g. queued, in_progress, completed).
    async fn run_status(&self, thread_id: &str, run_id: &str) -> Result<String, UpstreamError>;

    /// List the messages of a thread, passed through as opaque JSON values.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Value>, UpstreamError>;
}

/// Errors from the upstream Assistants API.
///
/// The HTTP layer reports all variants with the same response shape; the
/// distinction exists so logs and `details` can carry what actually happened.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-2xx status.
    #[error("upstream returned status {status}")]
    Api {
        status: u16,
        /// Error body as upstream sent it, parsed if it was JSON.
        body: Value,
    },

    /// The request never produced an upstream response.
    #[error("network error: {0}")]
    Network(String),

    /// Upstream answered 2xx but the body was not in the expected shape.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl UpstreamError {
    /// The payload to report to the caller: the upstream error body when one
    /// exists, otherwise the error message as a JSON string.
    pub fn details(&self) -> Value {
        match self {
            UpstreamError::Api { body, .. } => body.clone(),
            other => Value::String(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_error_details_carry_upstream_body() {
        let err = UpstreamError::Api {
            status: 404,
            body: json!({ "error": { "message": "No thread found" } }),
        };
        assert_eq!(
            err.details(),
            json!({ "error": { "message": "No thread found" } })
        );
    }

    #[test]
    fn network_error_details_fall_back_to_message() {
        let err = UpstreamError::Network("connection refused".to_string());
        assert_eq!(err.details(), json!("network error: connection refused"));
    }

    #[test]
    fn malformed_response_details_fall_back_to_message() {
        let err = UpstreamError::MalformedResponse("missing id field".to_string());
        assert_eq!(
            err.details(),
            json!("malformed upstream response: missing id field")
        );
    }
}
