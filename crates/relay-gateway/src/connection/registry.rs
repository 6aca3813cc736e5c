//! Presence registry
//!
//! The single shared mutable resource of the relay: maps user identities to
//! their current live connection and out-of-band notification address. Uses
//! `DashMap` so every operation is atomic per entry; two connections may
//! concurrently register, resolve, and clear overlapping identities.

use super::Connection;
use crate::protocol::SignalMessage;
use dashmap::DashMap;
use relay_core::UserId;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Presence state for one user identity
///
/// The record is created lazily on first `register`/`register_push` and is
/// never evicted: a notification address outlives disconnects so the push
/// fallback keeps working while the user is offline. Unbounded growth over
/// very long process lifetimes is a known, accepted limitation.
#[derive(Debug, Clone, Default)]
pub(crate) struct UserPresence {
    /// ID of the current live connection; None while offline
    live_connection: Option<String>,

    /// Out-of-band notification address; survives disconnects
    push_token: Option<String>,
}

impl UserPresence {
    /// Whether a live connection is currently recorded
    fn is_online(&self) -> bool {
        self.live_connection.is_some()
    }
}

/// Maps user identities to live connections and notification addresses
///
/// Holds the connection table as well, so resolving a user yields a live
/// handle in one place and stale connection IDs degrade to a miss instead of
/// dangling.
pub struct PresenceRegistry {
    /// Active connections by connection ID
    connections: DashMap<String, Arc<Connection>>,

    /// User ID to presence record mapping
    presences: DashMap<UserId, UserPresence>,
}

impl PresenceRegistry {
    /// Create a new registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            presences: DashMap::new(),
        }
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Accept a new connection into the table
    pub fn add_connection(&self, sender: mpsc::Sender<SignalMessage>) -> Arc<Connection> {
        let connection_id = Connection::generate_id();
        let connection = Connection::new(connection_id.clone(), sender);
        self.connections
            .insert(connection_id.clone(), connection.clone());

        tracing::debug!(connection_id = %connection_id, "Connection added");

        connection
    }

    /// Get a connection by ID
    pub fn get_connection(&self, connection_id: &str) -> Option<Arc<Connection>> {
        self.connections.get(connection_id).map(|r| r.clone())
    }

    /// Register a user identity on a connection (last-write-wins upsert)
    ///
    /// Stores the back-reference on the connection and points the user's
    /// presence record at it. A later registration for the same user simply
    /// supersedes the previous handle; the prior connection is not closed.
    pub async fn register(&self, user_id: UserId, connection: &Arc<Connection>) {
        connection.set_user_id(user_id.clone()).await;

        self.presences
            .entry(user_id.clone())
            .or_default()
            .live_connection = Some(connection.connection_id().to_string());

        tracing::debug!(
            connection_id = %connection.connection_id(),
            user_id = %user_id,
            "Live connection registered"
        );
    }

    /// Record a notification address for a user (idempotent upsert)
    ///
    /// Creates the presence record if absent; empty addresses are ignored.
    pub fn register_push(&self, user_id: UserId, push_token: String) {
        if push_token.is_empty() {
            return;
        }

        self.presences.entry(user_id.clone()).or_default().push_token = Some(push_token);

        tracing::debug!(user_id = %user_id, "Notification address registered");
    }

    /// Resolve a user's live connection; pure lookup, no side effects
    ///
    /// Follows the recorded connection ID into the connection table, so a
    /// handle left behind by an already-removed connection resolves to None.
    pub fn resolve_live(&self, user_id: &UserId) -> Option<Arc<Connection>> {
        let connection_id = self
            .presences
            .get(user_id)
            .and_then(|p| p.live_connection.clone())?;

        self.connections.get(&connection_id).map(|r| r.clone())
    }

    /// Resolve a user's notification address; pure lookup
    pub fn resolve_push_token(&self, user_id: &UserId) -> Option<String> {
        self.presences
            .get(user_id)
            .and_then(|p| p.push_token.clone())
    }

    /// Remove a connection and clear its user's live-connection entry
    ///
    /// Clearing is scoped to this specific handle: the presence record is
    /// only touched if it still references the removed connection, so a
    /// stale disconnect never clobbers a newer registration for the same
    /// user. The notification address is left intact either way.
    pub async fn remove_connection(&self, connection: &Arc<Connection>) {
        self.connections.remove(connection.connection_id());

        if let Some(user_id) = connection.user_id().await {
            self.presences.alter(&user_id, |_, mut presence| {
                if presence.live_connection.as_deref() == Some(connection.connection_id()) {
                    presence.live_connection = None;
                }
                presence
            });

            tracing::debug!(
                connection_id = %connection.connection_id(),
                user_id = %user_id,
                "Connection removed"
            );
        } else {
            tracing::debug!(
                connection_id = %connection.connection_id(),
                "Unregistered connection removed"
            );
        }
    }

    /// Get the total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get the number of known user identities (online or not)
    pub fn user_count(&self) -> usize {
        self.presences.len()
    }

    /// Get the number of users with a live connection
    pub fn online_count(&self) -> usize {
        self.presences.iter().filter(|p| p.is_online()).count()
    }
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PresenceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceRegistry")
            .field("connections", &self.connections.len())
            .field("users", &self.presences.len())
            .finish()
    }
}
