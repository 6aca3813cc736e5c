//! RTC credential issuing
//!
//! Produces the time-bounded access token a client presents to the external
//! media transport when joining a channel. Uses the `jsonwebtoken` crate for
//! HS256 signing; the transport validates tokens independently, the relay
//! never stores them.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use relay_core::ChannelName;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Role a credential grants on the media channel
///
/// Only the publisher capability is issued; subscriber-only credentials are
/// not part of this relay's surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RtcRole {
    Publisher,
}

impl RtcRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Publisher => "publisher",
        }
    }
}

/// Claims bound into an RTC credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RtcClaims {
    /// Application identity
    pub app: String,
    /// Target media channel
    pub channel: String,
    /// Numeric participant identifier
    pub uid: u64,
    /// Granted role
    pub role: RtcRole,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Issued credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RtcToken {
    pub token: String,
    pub expires_at: i64,
}

/// Issues signed, time-bounded media-channel credentials
#[derive(Clone)]
pub struct RtcTokenIssuer {
    app_id: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    default_ttl: i64,
}

impl RtcTokenIssuer {
    /// Create a new issuer with the given application identity and secret
    #[must_use]
    pub fn new(app_id: impl Into<String>, secret: &str, default_ttl: i64) -> Self {
        Self {
            app_id: app_id.into(),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            default_ttl,
        }
    }

    /// Issue a publisher credential for `uid` on `channel`
    ///
    /// The TTL defaults to the configured value when unspecified and is added
    /// to the current time to produce the absolute expiry bound into the
    /// signed claims.
    ///
    /// # Errors
    /// Returns `AppError::Signing` if the signing primitive fails; never
    /// retried.
    pub fn issue(
        &self,
        channel: &ChannelName,
        uid: u64,
        ttl: Option<i64>,
    ) -> Result<RtcToken, AppError> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let now = Utc::now();
        let expires_at = (now + Duration::seconds(ttl)).timestamp();

        let claims = RtcClaims {
            app: self.app_id.clone(),
            channel: channel.as_str().to_string(),
            uid,
            role: RtcRole::Publisher,
            iat: now.timestamp(),
            exp: expires_at,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Signing(e.into()))?;

        Ok(RtcToken { token, expires_at })
    }

    /// Decode and validate a credential issued by this signer
    ///
    /// # Errors
    /// Returns `AppError::Validation` if the token is malformed or expired.
    pub fn decode(&self, token: &str) -> Result<RtcClaims, AppError> {
        let token_data = decode::<RtcClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(token_data.claims)
    }

    /// Default TTL in seconds
    #[must_use]
    pub fn default_ttl(&self) -> i64 {
        self.default_ttl
    }
}

impl std::fmt::Debug for RtcTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RtcTokenIssuer")
            .field("app_id", &self.app_id)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}
