//! HTTP handler for the relay endpoint.
//!
//! One handler dispatches all five actions. Every successful dispatch makes
//! exactly one upstream call through the AssistantClient port; every
//! validation failure returns before any call is made.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::Value;

use crate::ports::{AssistantClient, UpstreamError};

use super::dto::{
    ActionRequest, ErrorBody, MessageAdded, MessagesView, RunStarted, RunStatusView,
    ThreadCreated,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for the relay handler.
#[derive(Clone)]
pub struct RelayAppState {
    /// Upstream client, present only when an API key is configured. A missing
    /// client surfaces per-request as the configuration error, so the server
    /// still boots (and answers) without a key.
    client: Option<Arc<dyn AssistantClient>>,
    /// Assistant every `runAssistant` dispatch starts a run against.
    assistant_id: String,
}

impl RelayAppState {
    /// Creates state with a configured upstream client.
    pub fn new(client: Arc<dyn AssistantClient>, assistant_id: impl Into<String>) -> Self {
        Self {
            client: Some(client),
            assistant_id: assistant_id.into(),
        }
    }

    /// Creates state without an upstream client (no API key configured).
    pub fn unconfigured(assistant_id: impl Into<String>) -> Self {
        Self {
            client: None,
            assistant_id: assistant_id.into(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// POST / — action dispatch
// ════════════════════════════════════════════════════════════════════════════════

/// POST handler dispatching on the `action` field.
///
/// # Errors
/// - 400: missing required field, or unknown action
/// - 405: non-POST method (routed to [`method_not_allowed`])
/// - 500: no API key configured, unparsable body, or any upstream failure
pub async fn handle_action(
    State(state): State<RelayAppState>,
    body: Bytes,
) -> Result<Response, RelayApiError> {
    // An unparsable body shares the catch-all path rather than getting its
    // own 4xx; it surfaces as a processing error.
    let request: ActionRequest = serde_json::from_slice(&body)
        .map_err(|e| RelayApiError::Internal(Value::String(e.to_string())))?;

    let client = state
        .client
        .as_deref()
        .ok_or(RelayApiError::Configuration)?;

    match request.action.as_str() {
        "createThread" => {
            let thread_id = client.create_thread().await?;
            Ok((StatusCode::OK, Json(ThreadCreated { thread_id })).into_response())
        }

        "addMessage" => {
            let (Some(thread_id), Some(message)) = (request.thread_id(), request.user_message())
            else {
                return Err(RelayApiError::MissingField("Missing threadId or message"));
            };

            let message_id = client.add_message(thread_id, message).await?;
            Ok((StatusCode::OK, Json(MessageAdded { message_id })).into_response())
        }

        "runAssistant" => {
            let Some(thread_id) = request.thread_id() else {
                return Err(RelayApiError::MissingField("Missing threadId"));
            };

            let run_id = client.start_run(thread_id, &state.assistant_id).await?;
            Ok((StatusCode::OK, Json(RunStarted { run_id })).into_response())
        }

        "checkRun" => {
            let (Some(thread_id), Some(run_id)) = (request.thread_id(), request.run_id()) else {
                return Err(RelayApiError::MissingField("Missing threadId or runId"));
            };

            let status = client.run_status(thread_id, run_id).await?;
            Ok((StatusCode::OK, Json(RunStatusView { status })).into_response())
        }

        "getMessages" => {
            let Some(thread_id) = request.thread_id() else {
                return Err(RelayApiError::MissingField("Missing threadId"));
            };

            let messages = client.list_messages(thread_id).await?;
            Ok((StatusCode::OK, Json(MessagesView { messages })).into_response())
        }

        _ => Err(RelayApiError::InvalidAction),
    }
}

/// Fallback for non-POST methods on the relay route.
pub async fn method_not_allowed() -> RelayApiError {
    RelayApiError::MethodNotAllowed
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts relay failures to HTTP responses.
#[derive(Debug)]
pub enum RelayApiError {
    /// Non-POST request. 405, plain-text body.
    MethodNotAllowed,
    /// Unknown action string. 400.
    InvalidAction,
    /// Required field absent for the requested action. 400.
    MissingField(&'static str),
    /// No API key configured; no upstream call was attempted. 500.
    Configuration,
    /// Catch-all: parse failure, network failure, or upstream rejection. 500.
    Internal(Value),
}

impl From<UpstreamError> for RelayApiError {
    fn from(err: UpstreamError) -> Self {
        tracing::error!(error = %err, "upstream call failed");
        RelayApiError::Internal(err.details())
    }
}

impl IntoResponse for RelayApiError {
    fn into_response(self) -> Response {
        match self {
            RelayApiError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response()
            }
            RelayApiError::InvalidAction => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new("Invalid action")),
            )
                .into_response(),
            RelayApiError::MissingField(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response()
            }
            RelayApiError::Configuration => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("API key not configured")),
            )
                .into_response(),
            RelayApiError::Internal(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::with_details("Error processing request", details)),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upstream_api_error_maps_to_catch_all_with_body() {
        let err: RelayApiError = UpstreamError::Api {
            status: 429,
            body: json!({ "error": "rate limited" }),
        }
        .into();

        match err {
            RelayApiError::Internal(details) => {
                assert_eq!(details, json!({ "error": "rate limited" }));
            }
            other => panic!("expected Internal, got {:?}", other),
        }
    }

    #[test]
    fn upstream_network_error_maps_to_catch_all_with_message() {
        let err: RelayApiError = UpstreamError::Network("connection refused".to_string()).into();

        match err {
            RelayApiError::Internal(details) => {
                assert_eq!(details, json!("network error: connection refused"));
            }
            other => panic!("expected Internal, got {:?}", other),
        }
    }

    #[test]
    fn error_statuses() {
        let cases = [
            (RelayApiError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (RelayApiError::InvalidAction, StatusCode::BAD_REQUEST),
            (
                RelayApiError::MissingField("Missing threadId"),
                StatusCode::BAD_REQUEST,
            ),
            (RelayApiError::Configuration, StatusCode::INTERNAL_SERVER_ERROR),
            (
                RelayApiError::Internal(json!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
