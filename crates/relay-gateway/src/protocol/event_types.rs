//! Signaling event names
//!
//! Inbound (client to relay) and outbound (relay to client) event names.
//! A call-lifecycle event is forwarded under its outbound name with the
//! sender's payload untouched.

use relay_core::CallKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Events a client may send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientEvent {
    /// Bind a user identity to this connection
    Register,
    /// Record an out-of-band notification address
    RegisterPush,
    /// Start a call
    Call,
    /// Accept an incoming call
    AcceptCall,
    /// Reject an incoming call
    RejectCall,
    /// Hang up
    EndCall,
}

impl ClientEvent {
    /// Get the wire name of the event
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::RegisterPush => "register_push",
            Self::Call => "call",
            Self::AcceptCall => "accept_call",
            Self::RejectCall => "reject_call",
            Self::EndCall => "end_call",
        }
    }

    /// Parse an event name from the wire
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "register" => Some(Self::Register),
            "register_push" => Some(Self::RegisterPush),
            "call" => Some(Self::Call),
            "accept_call" => Some(Self::AcceptCall),
            "reject_call" => Some(Self::RejectCall),
            "end_call" => Some(Self::EndCall),
            _ => None,
        }
    }
}

impl fmt::Display for ClientEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events the relay sends to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerEvent {
    /// A call is arriving for this connection's user
    IncomingCall,
    /// The callee of a fresh call attempt has no live connection
    CalleeUnavailable,
    /// The callee accepted
    CallAccepted,
    /// The callee rejected
    CallRejected,
    /// The other side hung up
    EndCall,
}

impl ServerEvent {
    /// Get the wire name of the event
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IncomingCall => "incoming_call",
            Self::CalleeUnavailable => "callee_unavailable",
            Self::CallAccepted => "call_accepted",
            Self::CallRejected => "call_rejected",
            Self::EndCall => "end_call",
        }
    }

    /// Outbound event name a call signal is forwarded under
    #[must_use]
    pub const fn for_kind(kind: CallKind) -> Self {
        match kind {
            CallKind::Call => Self::IncomingCall,
            CallKind::Accept => Self::CallAccepted,
            CallKind::Reject => Self::CallRejected,
            CallKind::End => Self::EndCall,
        }
    }
}

impl fmt::Display for ServerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
