//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("User ID must not be empty")]
    EmptyUserId,

    #[error("Channel name must not be empty")]
    EmptyChannelName,
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyUserId => "EMPTY_USER_ID",
            Self::EmptyChannelName => "EMPTY_CHANNEL_NAME",
        }
    }

    /// All current domain errors are input-validation failures
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyUserId | Self::EmptyChannelName)
    }
}
