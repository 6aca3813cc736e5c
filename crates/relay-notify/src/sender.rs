//! Push sender seam and HTTP implementation

use async_trait::async_trait;

use crate::error::PushError;
use crate::notification::PushNotification;

/// Delivery seam for out-of-band notifications
///
/// The gateway depends on this trait rather than a concrete client so tests
/// can observe submissions without a network.
#[async_trait]
pub trait PushSender: Send + Sync {
    /// Submit the alert once; the caller owns any retry policy (there is none)
    async fn send(&self, notification: &PushNotification) -> Result<(), PushError>;
}

/// HTTP client for the external delivery provider
pub struct HttpPushClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPushClient {
    /// Create a client targeting the given delivery endpoint
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// The configured delivery endpoint
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PushSender for HttpPushClient {
    async fn send(&self, notification: &PushNotification) -> Result<(), PushError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(notification)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                to = %notification.to,
                "Push delivery rejected"
            );
            return Err(PushError::Delivery {
                status: status.as_u16(),
            });
        }

        tracing::debug!(to = %notification.to, "Push notification submitted");

        Ok(())
    }
}

impl std::fmt::Debug for HttpPushClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPushClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
