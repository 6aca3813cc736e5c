//! Push notification payload
//!
//! The alert shape is fixed: the receiving app only ever needs to ring for an
//! incoming call, so the payload carries the caller, the channel to join, and
//! display strings for the platform notification.

use serde::{Deserialize, Serialize};

/// Payload submitted to the delivery collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNotification {
    /// Recipient notification address (device push token)
    pub to: String,
    pub title: String,
    pub body: String,
    pub sound: String,
    pub data: PushData,
}

/// Application data attached to the alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushData {
    #[serde(rename = "type")]
    pub kind: String,
    pub from: String,
    pub channel: String,
}

impl PushNotification {
    /// Build the incoming-call alert for `to`
    #[must_use]
    pub fn incoming_call(
        to: impl Into<String>,
        from: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        let from = from.into();
        Self {
            to: to.into(),
            title: "Incoming call".to_string(),
            body: format!("{from} is calling"),
            sound: "default".to_string(),
            data: PushData {
                kind: "incoming_call".to_string(),
                from,
                channel: channel.into(),
            },
        }
    }
}
