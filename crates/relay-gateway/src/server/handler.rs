//! WebSocket handler
//!
//! Accepts connections and runs their message loops. Each connection gets a
//! receive task (inbound events, handled in arrival order) and a send task
//! (outbound channel drained into the socket); when either ends, the
//! connection is cleaned up exactly once.

use crate::connection::Connection;
use crate::handlers::EventDispatcher;
use crate::protocol::SignalMessage;
use crate::server::GatewayState;
use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Channel buffer size for outgoing messages
const MESSAGE_BUFFER_SIZE: usize = 100;

/// WebSocket upgrade handler
pub async fn ws_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: axum::extract::ws::WebSocket) {
    // Create message channel for outgoing messages
    let (tx, mut rx) = mpsc::channel::<SignalMessage>(MESSAGE_BUFFER_SIZE);

    // Register connection
    let connection = state.registry().add_connection(tx);
    let connection_id = connection.connection_id().to_string();

    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    // Split the WebSocket
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Clone state for tasks
    let state_recv = state.clone();
    let connection_recv = connection.clone();
    let connection_id_recv = connection_id.clone();

    // Spawn task to receive messages from WebSocket
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    handle_text_message(&state_recv, &connection_recv, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        connection_id = %connection_id_recv,
                        "Binary messages not supported; ignored"
                    );
                }
                Ok(Message::Ping(_)) => {
                    tracing::trace!(connection_id = %connection_id_recv, "Ping received");
                    // Pong is handled automatically by axum
                }
                Ok(Message::Pong(_)) => {
                    tracing::trace!(connection_id = %connection_id_recv, "Pong received");
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(connection_id = %connection_id_recv, "Client closed connection");
                    return;
                }
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_id_recv,
                        error = %e,
                        "WebSocket error"
                    );
                    return;
                }
            }
        }
    });

    // Clone for send task
    let connection_id_send = connection_id.clone();

    // Spawn task to send messages to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = msg.to_json() {
                if ws_sink.send(Message::Text(json.into())).await.is_err() {
                    tracing::warn!(
                        connection_id = %connection_id_send,
                        "Failed to send message to WebSocket"
                    );
                    break;
                }
            }
        }

        // Close the WebSocket when channel is closed
        let _ = ws_sink.close().await;
    });

    // Wait for either task to complete
    tokio::select! {
        _ = recv_task => {
            tracing::debug!(connection_id = %connection_id, "Receive task ended");
        }
        _ = send_task => {
            tracing::debug!(connection_id = %connection_id, "Send task ended");
        }
    }

    // Clean up: clears this user's live-connection entry if still ours
    state.registry().remove_connection(&connection).await;

    tracing::info!(
        connection_id = %connection_id,
        age_secs = connection.age().as_secs(),
        "Connection closed"
    );
}

/// Handle a text frame from the client
///
/// Decode failures and handler errors are isolated to this single frame; the
/// connection always stays open.
async fn handle_text_message(state: &GatewayState, connection: &Arc<Connection>, text: &str) {
    let message = match SignalMessage::from_json(text) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!(
                connection_id = %connection.connection_id(),
                error = %e,
                "Ignoring undecodable frame"
            );
            return;
        }
    };

    tracing::trace!(
        connection_id = %connection.connection_id(),
        event = %message.event,
        "Received event"
    );

    if let Err(e) = EventDispatcher::dispatch(state, connection, message).await {
        tracing::warn!(
            connection_id = %connection.connection_id(),
            error = %e,
            "Event handler error"
        );
    }
}
