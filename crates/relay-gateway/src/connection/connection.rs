//! Individual WebSocket connection
//!
//! Represents a single live connection and its state. The user back-reference
//! is written at registration time and read at cleanup, so a disconnect never
//! has to reverse-scan the registry to find out which user it belonged to.

use crate::protocol::SignalMessage;
use relay_core::UserId;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, RwLock};

/// A single live WebSocket connection
pub struct Connection {
    /// Unique connection ID
    connection_id: String,

    /// User identity registered on this connection (None until `register`)
    user_id: RwLock<Option<UserId>>,

    /// Channel to send messages to the WebSocket
    sender: mpsc::Sender<SignalMessage>,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection
    pub fn new(connection_id: String, sender: mpsc::Sender<SignalMessage>) -> Arc<Self> {
        Arc::new(Self {
            connection_id,
            user_id: RwLock::new(None),
            sender,
            created_at: Instant::now(),
        })
    }

    /// Generate a new connection ID
    #[must_use]
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Get the connection ID
    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    /// Get the registered user ID (if any)
    pub async fn user_id(&self) -> Option<UserId> {
        self.user_id.read().await.clone()
    }

    /// Set the user ID (on registration; a later registration overwrites)
    pub async fn set_user_id(&self, user_id: UserId) {
        *self.user_id.write().await = Some(user_id);
    }

    /// Check if a user has registered on this connection
    pub async fn is_registered(&self) -> bool {
        self.user_id.read().await.is_some()
    }

    /// Get connection age
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }

    /// Send a message to this connection
    pub async fn send(
        &self,
        message: SignalMessage,
    ) -> Result<(), mpsc::error::SendError<SignalMessage>> {
        self.sender.send(message).await
    }

    /// Try to send a message (non-blocking)
    pub fn try_send(
        &self,
        message: SignalMessage,
    ) -> Result<(), mpsc::error::TrySendError<SignalMessage>> {
        self.sender.try_send(message)
    }

    /// Check if the sender channel is closed
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("connection_id", &self.connection_id)
            .field("created_at", &self.created_at)
            .finish()
    }
}
