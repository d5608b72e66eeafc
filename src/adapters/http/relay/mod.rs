//! Relay HTTP adapter - the single action-dispatch endpoint.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{RelayApiError, RelayAppState};
pub use routes::{relay_router, relay_routes};
