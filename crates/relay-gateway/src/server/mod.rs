//! Gateway server setup
//!
//! Provides the main server configuration and routes.

mod handler;
mod state;

pub use handler::ws_handler;
pub use state::GatewayState;

use crate::connection::PresenceRegistry;
use crate::http::{health_check, rtc_token, send_push};
use axum::{
    routing::{get, post},
    Router,
};
use relay_common::{AppConfig, AppError, RtcTokenIssuer};
use relay_notify::{HttpPushClient, PushSender};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health_check))
        .route("/rtcToken", get(rtc_token))
        .route("/sendPush", post(send_push))
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize all dependencies and create `GatewayState`
pub fn create_gateway_state(config: AppConfig) -> GatewayState {
    let registry = PresenceRegistry::new_shared();

    let token_issuer = Arc::new(RtcTokenIssuer::new(
        config.rtc.app_id.clone(),
        &config.rtc.app_secret,
        config.rtc.token_ttl,
    ));

    let push_sender: Arc<dyn PushSender> = Arc::new(HttpPushClient::new(&config.push.endpoint));

    GatewayState::new(registry, token_issuer, push_sender, config)
}

/// Run the gateway server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    tracing::info!("Starting gateway server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Gateway listening on ws://{}/ws", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    // Create gateway state
    let state = create_gateway_state(config);

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
