//! Assistant Relay server binary.
//!
//! Loads configuration from the environment, wires the upstream client into
//! the relay router, and serves the single endpoint until ctrl-c.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use assistant_relay::adapters::assistant::{OpenAiAssistantClient, OpenAiClientConfig};
use assistant_relay::adapters::http::relay::{relay_router, RelayAppState};
use assistant_relay::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let state = build_state(&config);
    let app = relay_router(state).layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        assistant_id = %config.upstream.assistant_id,
        "assistant-relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wires the upstream client into the relay state.
///
/// A missing API key does not prevent startup; the relay answers every
/// request with the configuration error until a key is provided.
fn build_state(config: &AppConfig) -> RelayAppState {
    let key = config
        .upstream
        .api_key
        .as_ref()
        .filter(|k| !k.expose_secret().is_empty());

    match key {
        Some(key) => {
            let client_config = OpenAiClientConfig::new(key.expose_secret().clone())
                .with_base_url(config.upstream.base_url.clone())
                .with_beta_header(config.upstream.beta_header.clone())
                .with_timeout(config.upstream.timeout());
            let client = Arc::new(OpenAiAssistantClient::new(client_config));
            RelayAppState::new(client, config.upstream.assistant_id.clone())
        }
        None => {
            tracing::warn!("no upstream API key configured; relay will reject every action");
            RelayAppState::unconfigured(config.upstream.assistant_id.clone())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
    }
}
