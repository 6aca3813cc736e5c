//! RTC credential handler
//!
//! GET /rtcToken?channelName=<name>&uid=<id>

use axum::extract::{Query, State};
use axum::Json;
use relay_core::ChannelName;
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiResult};
use crate::server::GatewayState;

/// Query parameters of the credential request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RtcTokenQuery {
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
}

/// Issued credential response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RtcTokenResponse {
    pub rtc_token: String,
    pub uid: u64,
    pub channel_name: String,
}

/// Issue a publisher credential for the requested channel and participant
///
/// The participant ID must be an integer; fractional or non-numeric input is
/// rejected rather than truncated.
pub async fn rtc_token(
    State(state): State<GatewayState>,
    Query(query): Query<RtcTokenQuery>,
) -> ApiResult<Json<RtcTokenResponse>> {
    let channel_name = query.channel_name.filter(|s| !s.is_empty());
    let uid_raw = query.uid.filter(|s| !s.is_empty());

    let (Some(channel_name), Some(uid_raw)) = (channel_name, uid_raw) else {
        return Err(ApiError::MissingTokenParams);
    };

    let channel = ChannelName::new(channel_name).map_err(|_| ApiError::MissingTokenParams)?;
    let uid: u64 = uid_raw.parse().map_err(|_| ApiError::NonNumericUid)?;

    let issued = state
        .token_issuer()
        .issue(&channel, uid, None)
        .map_err(ApiError::TokenGeneration)?;

    tracing::debug!(channel = %channel, uid = uid, "RTC token issued");

    Ok(Json(RtcTokenResponse {
        rtc_token: issued.token,
        uid,
        channel_name: channel.into_inner(),
    }))
}
