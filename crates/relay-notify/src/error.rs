//! Push delivery error types

use thiserror::Error;

/// Errors from the push-delivery collaborator
#[derive(Debug, Error)]
pub enum PushError {
    /// The request never produced a response
    #[error("Push transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The collaborator answered with a non-success status
    #[error("Push delivery rejected with status {status}")]
    Delivery { status: u16 },
}
