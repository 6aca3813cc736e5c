//! Signal message format
//!
//! Every frame on the event channel is `{"event": <name>, "data": <payload>}`.
//! The relay treats `data` as opaque: forwarded events carry the sender's
//! original payload, field for field.

use super::ServerEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One frame on the signaling channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalMessage {
    /// Event name
    pub event: String,

    /// Opaque event payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl SignalMessage {
    /// Create a message
    #[must_use]
    pub fn new(event: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    /// Forward a call signal under its outbound name with the payload unchanged
    #[must_use]
    pub fn forward(event: ServerEvent, data: Option<Value>) -> Self {
        Self::new(event.as_str(), data)
    }

    /// Build the unavailable notice for the originator of a fresh call
    ///
    /// `to` is echoed exactly as received; when the caller never supplied it,
    /// the field stays absent.
    #[must_use]
    pub fn callee_unavailable(to: Option<String>) -> Self {
        let mut data = serde_json::Map::new();
        if let Some(to) = to {
            data.insert("to".to_string(), Value::String(to));
        }
        Self::new(
            ServerEvent::CalleeUnavailable.as_str(),
            Some(Value::Object(data)),
        )
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for SignalMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SignalMessage(event={})", self.event)
    }
}
