//! Push fallback handler
//!
//! POST /sendPush - the explicit out-of-band path when the callee has no
//! live connection. Submits the alert once; delivery failure is surfaced,
//! never retried.

use axum::extract::State;
use axum::Json;
use relay_core::UserId;
use relay_notify::PushNotification;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{ApiError, ApiResult, ValidatedJson};
use crate::server::GatewayState;

/// Push fallback request body
#[derive(Debug, Deserialize, Validate)]
pub struct SendPushRequest {
    #[validate(length(min = 1))]
    pub to: String,

    #[validate(length(min = 1))]
    pub from: String,

    #[validate(length(min = 1))]
    pub channel: String,
}

/// Push fallback response
#[derive(Debug, Serialize)]
pub struct SendPushResponse {
    pub ok: bool,
}

/// Ring the recipient out-of-band
pub async fn send_push(
    State(state): State<GatewayState>,
    ValidatedJson(request): ValidatedJson<SendPushRequest>,
) -> ApiResult<Json<SendPushResponse>> {
    let to = UserId::new(request.to).map_err(|e| ApiError::Validation(e.to_string()))?;

    let Some(push_token) = state.registry().resolve_push_token(&to) else {
        tracing::debug!(user_id = %to, "Push requested for user without token");
        return Err(ApiError::NoPushToken);
    };

    let notification = PushNotification::incoming_call(push_token, request.from, request.channel);

    state
        .push_sender()
        .send(&notification)
        .await
        .map_err(ApiError::PushFailed)?;

    tracing::info!(user_id = %to, "Fallback push sent");

    Ok(Json(SendPushResponse { ok: true }))
}
