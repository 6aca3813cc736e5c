//! Call-event model
//!
//! A call session moves through at most four signal kinds: the initial call,
//! an accept or reject from the callee, and an end from either side. Events
//! are transient - routed at most once, never persisted or replayed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a call-lifecycle signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    /// Fresh call attempt from caller to callee
    Call,
    /// Callee accepted; routed back to the caller
    Accept,
    /// Callee rejected; routed back to the caller
    Reject,
    /// Either side hung up
    End,
}

impl CallKind {
    /// Short name used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::End => "end",
        }
    }

    /// Only a fresh call attempt reports an unreachable recipient back to the
    /// sender; accept/reject/end are reactions to a call the recipient was
    /// already reachable for, and drop silently on a resolution miss.
    #[must_use]
    pub const fn reports_unavailable(self) -> bool {
        matches!(self, Self::Call)
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
