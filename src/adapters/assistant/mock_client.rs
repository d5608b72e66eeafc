//! Mock Assistant Client for testing.
//!
//! Provides a configurable mock implementation of the AssistantClient port,
//! allowing the HTTP layer to be tested without calling the real API.
//!
//! # Features
//!
//! - Scripted responses (consumed in order, last one repeats)
//! - Error injection for failure-path testing
//! - Call recording for verifying what went out
//!
//! # Example
//!
//! ```ignore
//! let client = MockAssistantClient::new().with_thread_id("t1");
//! let id = client.create_thread().await?;
//! assert_eq!(id, "t1");
//! assert_eq!(client.calls(), vec![RecordedCall::CreateThread]);
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{AssistantClient, UpstreamError};

/// One recorded upstream call, with the arguments the relay passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    CreateThread,
    AddMessage { thread_id: String, content: String },
    StartRun { thread_id: String, assistant_id: String },
    RunStatus { thread_id: String, run_id: String },
    ListMessages { thread_id: String },
}

/// A scripted outcome for the next call.
#[derive(Debug, Clone)]
enum MockOutcome {
    Ok,
    ApiError { status: u16, body: Value },
    NetworkError(String),
}

/// Mock assistant client for testing.
#[derive(Clone)]
pub struct MockAssistantClient {
    thread_id: String,
    message_id: String,
    run_id: String,
    run_status: String,
    messages: Vec<Value>,
    /// Scripted outcomes, consumed in order. Empty queue means success.
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockAssistantClient {
    pub fn new() -> Self {
        Self {
            thread_id: "thread_mock".to_string(),
            message_id: "msg_mock".to_string(),
            run_id: "run_mock".to_string(),
            run_status: "queued".to_string(),
            messages: Vec::new(),
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sets the thread id returned by `create_thread`.
    pub fn with_thread_id(mut self, id: impl Into<String>) -> Self {
        self.thread_id = id.into();
        self
    }

    /// Sets the message id returned by `add_message`.
    pub fn with_message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = id.into();
        self
    }

    /// Sets the run id returned by `start_run`.
    pub fn with_run_id(mut self, id: impl Into<String>) -> Self {
        self.run_id = id.into();
        self
    }

    /// Sets the status returned by `run_status`.
    pub fn with_run_status(mut self, status: impl Into<String>) -> Self {
        self.run_status = status.into();
        self
    }

    /// Sets the messages returned by `list_messages`.
    pub fn with_messages(mut self, messages: Vec<Value>) -> Self {
        self.messages = messages;
        self
    }

    /// Queues an upstream API error for the next call.
    pub fn with_api_error(self, status: u16, body: Value) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::ApiError { status, body });
        self
    }

    /// Queues a network failure for the next call.
    pub fn with_network_error(self, message: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::NetworkError(message.into()));
        self
    }

    /// Returns all calls recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the number of calls recorded so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: RecordedCall) -> Result<(), UpstreamError> {
        self.calls.lock().unwrap().push(call);
        match self.outcomes.lock().unwrap().pop_front() {
            None | Some(MockOutcome::Ok) => Ok(()),
            Some(MockOutcome::ApiError { status, body }) => {
                Err(UpstreamError::Api { status, body })
            }
            Some(MockOutcome::NetworkError(message)) => Err(UpstreamError::Network(message)),
        }
    }
}

impl Default for MockAssistantClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssistantClient for MockAssistantClient {
    async fn create_thread(&self) -> Result<String, UpstreamError> {
        self.record(RecordedCall::CreateThread)?;
        Ok(self.thread_id.clone())
    }

    async fn add_message(&self, thread_id: &str, content: &str) -> Result<String, UpstreamError> {
        self.record(RecordedCall::AddMessage {
            thread_id: thread_id.to_string(),
            content: content.to_string(),
        })?;
        Ok(self.message_id.clone())
    }

    async fn start_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<String, UpstreamError> {
        self.record(RecordedCall::StartRun {
            thread_id: thread_id.to_string(),
            assistant_id: assistant_id.to_string(),
        })?;
        Ok(self.run_id.clone())
    }

    async fn run_status(&self, thread_id: &str, run_id: &str) -> Result<String, UpstreamError> {
        self.record(RecordedCall::RunStatus {
            thread_id: thread_id.to_string(),
            run_id: run_id.to_string(),
        })?;
        Ok(self.run_status.clone())
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Value>, UpstreamError> {
        self.record(RecordedCall::ListMessages {
            thread_id: thread_id.to_string(),
        })?;
        Ok(self.messages.clone())
    }
}
