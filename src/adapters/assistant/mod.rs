//! Assistant adapters - implementations of the AssistantClient port.

mod mock_client;
mod openai_client;

pub use mock_client::{MockAssistantClient, RecordedCall};
pub use openai_client::{OpenAiAssistantClient, OpenAiClientConfig};
