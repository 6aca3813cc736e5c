//! Registration handlers (`register`, `register_push`)

use super::{decode_payload, HandlerResult};
use crate::connection::Connection;
use crate::protocol::{RegisterPayload, RegisterPushPayload};
use crate::server::GatewayState;
use relay_core::UserId;
use serde_json::Value;
use std::sync::Arc;

/// Handles presence registration events
pub struct RegisterHandler;

impl RegisterHandler {
    /// Handle `register`: bind a user identity to this connection
    ///
    /// An empty or absent user ID is a silent no-op per the registry contract.
    pub async fn handle_register(
        state: &GatewayState,
        connection: &Arc<Connection>,
        data: Option<Value>,
    ) -> HandlerResult<()> {
        let payload: RegisterPayload = decode_payload(data)?;

        let Some(user_id) = UserId::from_field(payload.user_id.as_deref()) else {
            tracing::debug!(
                connection_id = %connection.connection_id(),
                "Register without user ID ignored"
            );
            return Ok(());
        };

        state.registry().register(user_id.clone(), connection).await;

        tracing::info!(
            connection_id = %connection.connection_id(),
            user_id = %user_id,
            "User registered"
        );

        Ok(())
    }

    /// Handle `register_push`: record an out-of-band notification address
    ///
    /// Ignored unless both the user ID and the address are present and
    /// non-empty. The address survives disconnects.
    pub async fn handle_register_push(
        state: &GatewayState,
        connection: &Arc<Connection>,
        data: Option<Value>,
    ) -> HandlerResult<()> {
        let payload: RegisterPushPayload = decode_payload(data)?;

        let user_id = UserId::from_field(payload.user_id.as_deref());
        let push_token = payload.push_token.filter(|t| !t.is_empty());

        let (Some(user_id), Some(push_token)) = (user_id, push_token) else {
            tracing::debug!(
                connection_id = %connection.connection_id(),
                "Incomplete register_push ignored"
            );
            return Ok(());
        };

        state.registry().register_push(user_id.clone(), push_token);

        tracing::info!(
            connection_id = %connection.connection_id(),
            user_id = %user_id,
            "Push token registered"
        );

        Ok(())
    }
}
