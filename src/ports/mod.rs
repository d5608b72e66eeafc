//! Ports - interfaces between the HTTP layer and external services.

mod assistant_client;

pub use assistant_client::{AssistantClient, UpstreamError};
