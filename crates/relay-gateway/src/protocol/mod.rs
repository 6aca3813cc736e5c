//! Signaling protocol
//!
//! Wire format for the bidirectional event channel: JSON text frames carrying
//! a named event and an opaque payload.

mod event_types;
mod messages;
mod payloads;

pub use event_types::{ClientEvent, ServerEvent};
pub use messages::SignalMessage;
pub use payloads::{CallTarget, RegisterPayload, RegisterPushPayload};
