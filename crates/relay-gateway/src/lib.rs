//! # relay-gateway
//!
//! Call-signaling relay server: presence registry, call-session routing over
//! WebSocket, RTC credential endpoint, and push fallback endpoint.

pub mod connection;
pub mod handlers;
pub mod http;
pub mod protocol;
pub mod server;

pub use server::{create_app, create_gateway_state, run, GatewayState};
