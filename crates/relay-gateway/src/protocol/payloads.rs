//! Typed views over inbound payloads
//!
//! Only the fields the relay itself needs are decoded; everything else stays
//! inside the opaque payload and passes through untouched.

use serde::Deserialize;
use serde_json::Value;

/// Payload of `register`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Payload of `register_push`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPushPayload {
    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub push_token: Option<String>,
}

/// Routing target extracted from a call-lifecycle payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallTarget {
    #[serde(default)]
    pub to: Option<String>,
}

impl CallTarget {
    /// Extract the target from an opaque payload; any shape that is not an
    /// object with a string `to` yields no target
    #[must_use]
    pub fn from_data(data: Option<&Value>) -> Self {
        data.cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }
}
