//! Gateway state
//!
//! Application state for the gateway server. The presence registry is
//! constructed at process start and injected here; nothing in the relay
//! reaches for ambient globals.

use crate::connection::PresenceRegistry;
use relay_common::{AppConfig, RtcTokenIssuer};
use relay_notify::PushSender;
use std::sync::Arc;

/// Gateway application state
///
/// Holds all shared dependencies for the gateway server.
#[derive(Clone)]
pub struct GatewayState {
    /// Presence registry for live connections and push tokens
    registry: Arc<PresenceRegistry>,
    /// RTC credential issuer
    token_issuer: Arc<RtcTokenIssuer>,
    /// Out-of-band delivery collaborator
    push_sender: Arc<dyn PushSender>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(
        registry: Arc<PresenceRegistry>,
        token_issuer: Arc<RtcTokenIssuer>,
        push_sender: Arc<dyn PushSender>,
        config: AppConfig,
    ) -> Self {
        Self {
            registry,
            token_issuer,
            push_sender,
            config: Arc::new(config),
        }
    }

    /// Get the presence registry
    pub fn registry(&self) -> &PresenceRegistry {
        &self.registry
    }

    /// Get the credential issuer
    pub fn token_issuer(&self) -> &RtcTokenIssuer {
        &self.token_issuer
    }

    /// Get the push sender
    pub fn push_sender(&self) -> &dyn PushSender {
        self.push_sender.as_ref()
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("registry", &self.registry)
            .field("token_issuer", &self.token_issuer)
            .finish_non_exhaustive()
    }
}
