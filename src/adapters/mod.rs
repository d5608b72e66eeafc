//! Adapters - implementations of ports against real infrastructure.

pub mod assistant;
pub mod http;
