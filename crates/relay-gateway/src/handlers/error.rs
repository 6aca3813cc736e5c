//! Handler error types

use thiserror::Error;

/// Handler error type
///
/// Surfaced to the socket loop for logging only; no handler error ever
/// terminates the owning connection.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Payload did not match the expected shape
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
