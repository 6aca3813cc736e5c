//! User ID - opaque stable identifier assigned by the application
//!
//! The relay never interprets the contents; uniqueness and stability are the
//! caller's responsibility. The only invariant enforced here is non-emptiness.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Opaque application-level user identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a new user ID, rejecting empty strings
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::EmptyUserId);
        }
        Ok(Self(id))
    }

    /// Build from an optional wire field; absent or empty yields None
    ///
    /// Registration events carry the ID as an optional JSON field, and the
    /// registry contract treats empty/absent IDs as a silent no-op.
    pub fn from_field(field: Option<&str>) -> Option<Self> {
        field.and_then(|s| Self::new(s).ok())
    }

    /// Get the inner string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
