//! Event handlers
//!
//! Routes inbound signaling events to the appropriate handler. A handler
//! failure is isolated to that single event: it is logged and the connection
//! stays open.

mod call;
mod error;
mod register;

pub use call::CallRouter;
pub use error::{HandlerError, HandlerResult};
pub use register::RegisterHandler;

use crate::connection::Connection;
use crate::protocol::{ClientEvent, SignalMessage};
use crate::server::GatewayState;
use relay_core::CallKind;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Dispatch incoming client events to the appropriate handlers
pub struct EventDispatcher;

impl EventDispatcher {
    /// Handle an incoming client event
    pub async fn dispatch(
        state: &GatewayState,
        connection: &Arc<Connection>,
        message: SignalMessage,
    ) -> HandlerResult<()> {
        let Some(event) = ClientEvent::from_str(&message.event) else {
            tracing::debug!(
                connection_id = %connection.connection_id(),
                event = %message.event,
                "Ignoring unknown event"
            );
            return Ok(());
        };

        match event {
            ClientEvent::Register => {
                RegisterHandler::handle_register(state, connection, message.data).await
            }
            ClientEvent::RegisterPush => {
                RegisterHandler::handle_register_push(state, connection, message.data).await
            }
            ClientEvent::Call => {
                CallRouter::handle(state, connection, CallKind::Call, message.data).await
            }
            ClientEvent::AcceptCall => {
                CallRouter::handle(state, connection, CallKind::Accept, message.data).await
            }
            ClientEvent::RejectCall => {
                CallRouter::handle(state, connection, CallKind::Reject, message.data).await
            }
            ClientEvent::EndCall => {
                CallRouter::handle(state, connection, CallKind::End, message.data).await
            }
        }
    }
}

/// Decode an optional payload into a typed view
///
/// An absent payload decodes like an empty object so optional fields default.
pub(crate) fn decode_payload<T: DeserializeOwned>(data: Option<Value>) -> HandlerResult<T> {
    let value = data.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
    serde_json::from_value(value).map_err(|e| HandlerError::InvalidPayload(e.to_string()))
}
