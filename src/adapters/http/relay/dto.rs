//! HTTP DTOs for the relay endpoint.
//!
//! camelCase fields, one flat request shape for all five actions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTO
// ════════════════════════════════════════════════════════════════════════════════

/// The single request shape accepted by the relay endpoint.
///
/// Which optional fields are required depends on `action`; presence is
/// checked per-action at dispatch time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    /// Action name, matched case-sensitively against the dispatch table.
    pub action: String,
    /// Message content for `addMessage`.
    #[serde(default)]
    pub user_message: Option<String>,
    /// Thread identifier minted by the upstream API.
    #[serde(default)]
    pub thread_id: Option<String>,
    /// Run identifier minted by the upstream API.
    #[serde(default)]
    pub run_id: Option<String>,
}

impl ActionRequest {
    /// Thread id, treating the empty string as absent.
    pub fn thread_id(&self) -> Option<&str> {
        present(&self.thread_id)
    }

    /// User message, treating the empty string as absent.
    pub fn user_message(&self) -> Option<&str> {
        present(&self.user_message)
    }

    /// Run id, treating the empty string as absent.
    pub fn run_id(&self) -> Option<&str> {
        present(&self.run_id)
    }
}

// Presence check only: clients send "" for unset fields.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// 200 body for `createThread`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadCreated {
    pub thread_id: String,
}

/// 200 body for `addMessage`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAdded {
    pub message_id: String,
}

/// 200 body for `runAssistant`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStarted {
    pub run_id: String,
}

/// 200 body for `checkRun`. The status string is upstream's, reported as-is.
#[derive(Debug, Clone, Serialize)]
pub struct RunStatusView {
    pub status: String,
}

/// 200 body for `getMessages`. Messages are upstream's `data` array, verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct MessagesView {
    pub messages: Vec<Value>,
}

/// Error body for 400/500 responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    /// Upstream error payload or local error message; only the catch-all sets it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: Value) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn action_request_deserializes_camel_case() {
        let request: ActionRequest = serde_json::from_value(json!({
            "action": "addMessage",
            "userMessage": "hello",
            "threadId": "t1"
        }))
        .unwrap();

        assert_eq!(request.action, "addMessage");
        assert_eq!(request.user_message(), Some("hello"));
        assert_eq!(request.thread_id(), Some("t1"));
        assert_eq!(request.run_id(), None);
    }

    #[test]
    fn action_request_only_needs_action() {
        let request: ActionRequest =
            serde_json::from_value(json!({ "action": "createThread" })).unwrap();
        assert_eq!(request.action, "createThread");
        assert_eq!(request.thread_id(), None);
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let request: ActionRequest = serde_json::from_value(json!({
            "action": "runAssistant",
            "threadId": ""
        }))
        .unwrap();
        assert_eq!(request.thread_id(), None);
    }

    #[test]
    fn success_bodies_use_camel_case() {
        let body = serde_json::to_value(ThreadCreated {
            thread_id: "t1".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({ "threadId": "t1" }));

        let body = serde_json::to_value(MessageAdded {
            message_id: "m1".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({ "messageId": "m1" }));

        let body = serde_json::to_value(RunStarted {
            run_id: "r1".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({ "runId": "r1" }));
    }

    #[test]
    fn error_body_omits_absent_details() {
        let body = serde_json::to_value(ErrorBody::new("Invalid action")).unwrap();
        assert_eq!(body, json!({ "error": "Invalid action" }));
    }

    #[test]
    fn error_body_keeps_details_when_present() {
        let body = serde_json::to_value(ErrorBody::with_details(
            "Error processing request",
            json!({ "error": { "message": "boom" } }),
        ))
        .unwrap();
        assert_eq!(
            body,
            json!({
                "error": "Error processing request",
                "details": { "error": { "message": "boom" } }
            })
        );
    }
}
