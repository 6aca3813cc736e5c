//! # relay-notify
//!
//! Client for the external push-notification delivery collaborator. Used as
//! the fallback signaling path when the callee has no live connection:
//! at-most-once, fire-and-forget, never retried.

mod error;
mod notification;
mod sender;

pub use error::PushError;
pub use notification::{PushData, PushNotification};
pub use sender::{HttpPushClient, PushSender};
