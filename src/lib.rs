//! Assistant Relay - Single-endpoint proxy for the OpenAI Assistants API
//!
//! This crate accepts action requests from a browser client and forwards each
//! one as exactly one call to the upstream Assistants API, injecting a
//! server-held API key so the key never reaches the client.

pub mod adapters;
pub mod config;
pub mod ports;
