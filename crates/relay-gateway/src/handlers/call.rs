//! Call session router
//!
//! Stateless relay for call-lifecycle events. Resolves the target user
//! through the presence registry and forwards the sender's payload verbatim
//! under the outbound event name. Events from one connection are handled in
//! arrival order by its receive loop; nothing is queued or retried.

use super::HandlerResult;
use crate::connection::Connection;
use crate::protocol::{CallTarget, ServerEvent, SignalMessage};
use crate::server::GatewayState;
use relay_core::{CallKind, UserId};
use serde_json::Value;
use std::sync::Arc;

/// Routes call-lifecycle events to the target user's live connection
pub struct CallRouter;

impl CallRouter {
    /// Route one call signal
    ///
    /// Resolution miss handling is deliberately asymmetric: only a fresh
    /// `call` replies `callee_unavailable` to the originator; accept, reject
    /// and end drop silently, since they answer a call the recipient was
    /// already reachable for.
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        kind: CallKind,
        data: Option<Value>,
    ) -> HandlerResult<()> {
        let target = CallTarget::from_data(data.as_ref());

        let recipient = target
            .to
            .as_deref()
            .and_then(|to| UserId::new(to).ok())
            .and_then(|to| state.registry().resolve_live(&to));

        let Some(recipient) = recipient else {
            return Self::miss(connection, kind, target.to).await;
        };

        let forwarded = SignalMessage::forward(ServerEvent::for_kind(kind), data);
        if recipient.send(forwarded).await.is_err() {
            // Recipient channel closed while routing; same degraded path as
            // an unresolvable target.
            return Self::miss(connection, kind, target.to).await;
        }

        tracing::debug!(
            connection_id = %connection.connection_id(),
            recipient_id = %recipient.connection_id(),
            kind = %kind,
            "Call signal forwarded"
        );

        Ok(())
    }

    /// Degraded path for an unreachable recipient
    async fn miss(
        connection: &Arc<Connection>,
        kind: CallKind,
        to: Option<String>,
    ) -> HandlerResult<()> {
        if kind.reports_unavailable() {
            let notice = SignalMessage::callee_unavailable(to.clone());
            if connection.send(notice).await.is_err() {
                tracing::debug!(
                    connection_id = %connection.connection_id(),
                    "Originator gone before unavailable notice"
                );
            }

            tracing::debug!(
                connection_id = %connection.connection_id(),
                to = to.as_deref().unwrap_or(""),
                "Callee unavailable"
            );
        } else {
            tracing::debug!(
                connection_id = %connection.connection_id(),
                to = to.as_deref().unwrap_or(""),
                kind = %kind,
                "Recipient unreachable; signal dropped"
            );
        }

        Ok(())
    }
}
