//! HTTP endpoint tests
//!
//! Exercises the health, credential, and push-fallback endpoints against a
//! real in-process server.

use anyhow::Result;
use integration_tests::helpers::{assert_json, settle, TestServer, TEST_SECRET};
use relay_common::{RtcRole, RtcTokenIssuer};
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_check() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server.get("/health").await?;
    let body: Value = assert_json(response, StatusCode::OK).await?;

    assert_eq!(body["status"], "ok");
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));

    Ok(())
}

#[tokio::test]
async fn test_rtc_token_valid_request() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server.get("/rtcToken?channelName=room1&uid=42").await?;
    let body: Value = assert_json(response, StatusCode::OK).await?;

    assert_eq!(body["uid"], 42);
    assert_eq!(body["channelName"], "room1");

    let token = body["rtcToken"].as_str().expect("rtcToken missing");
    assert!(!token.is_empty());

    // The credential must verify against the shared secret and carry the
    // requested channel, uid, and the fixed publisher role.
    let issuer = RtcTokenIssuer::new("test-app", TEST_SECRET, 3600);
    let claims = issuer.decode(token).expect("token must verify");
    assert_eq!(claims.channel, "room1");
    assert_eq!(claims.uid, 42);
    assert_eq!(claims.role, RtcRole::Publisher);
    assert!(claims.exp > claims.iat);

    Ok(())
}

#[tokio::test]
async fn test_rtc_token_missing_params() -> Result<()> {
    let server = TestServer::start().await?;

    for path in [
        "/rtcToken",
        "/rtcToken?channelName=room1",
        "/rtcToken?uid=42",
        "/rtcToken?channelName=room1&uid=",
        "/rtcToken?channelName=&uid=42",
    ] {
        let response = server.get(path).await?;
        let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await?;
        assert_eq!(body["error"], "channelName and uid required", "path: {path}");
    }

    Ok(())
}

#[tokio::test]
async fn test_rtc_token_non_numeric_uid() -> Result<()> {
    let server = TestServer::start().await?;

    for path in [
        "/rtcToken?channelName=room1&uid=abc",
        "/rtcToken?channelName=room1&uid=4.5",
        "/rtcToken?channelName=room1&uid=-7",
    ] {
        let response = server.get(path).await?;
        let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await?;
        assert_eq!(body["error"], "uid must be numeric", "path: {path}");
    }

    Ok(())
}

#[tokio::test]
async fn test_send_push_without_registered_token() -> Result<()> {
    let server = TestServer::start().await?;

    let response = server
        .post(
            "/sendPush",
            &json!({"to": "ghost", "from": "patient", "channel": "room1"}),
        )
        .await?;
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await?;

    assert_eq!(body["error"], "No push token for recipient");
    assert!(server.push.sent().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_send_push_delivers_alert() -> Result<()> {
    let server = TestServer::start().await?;

    let mut ws = server.ws_connect().await?;
    ws.send_event(
        "register_push",
        json!({"userId": "doctor", "pushToken": "ExponentPushToken[abc]"}),
    )
    .await?;
    settle().await;

    let response = server
        .post(
            "/sendPush",
            &json!({"to": "doctor", "from": "patient", "channel": "room1"}),
        )
        .await?;
    let body: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(body["ok"], true);

    let sent = server.push.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ExponentPushToken[abc]");
    assert_eq!(sent[0].data.kind, "incoming_call");
    assert_eq!(sent[0].data.from, "patient");
    assert_eq!(sent[0].data.channel, "room1");

    ws.close().await?;
    Ok(())
}

#[tokio::test]
async fn test_send_push_works_after_disconnect() -> Result<()> {
    let server = TestServer::start().await?;

    let mut ws = server.ws_connect().await?;
    ws.send_event("register", json!({"userId": "doctor"})).await?;
    ws.send_event(
        "register_push",
        json!({"userId": "doctor", "pushToken": "tok-1"}),
    )
    .await?;
    settle().await;

    // The notification address must survive the disconnect
    ws.close().await?;
    settle().await;

    let response = server
        .post(
            "/sendPush",
            &json!({"to": "doctor", "from": "patient", "channel": "room1"}),
        )
        .await?;
    let body: Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(body["ok"], true);
    assert_eq!(server.push.sent().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_send_push_delivery_failure() -> Result<()> {
    let server = TestServer::start().await?;

    let mut ws = server.ws_connect().await?;
    ws.send_event(
        "register_push",
        json!({"userId": "doctor", "pushToken": "tok-1"}),
    )
    .await?;
    settle().await;

    server.push.fail_next(true);

    let response = server
        .post(
            "/sendPush",
            &json!({"to": "doctor", "from": "patient", "channel": "room1"}),
        )
        .await?;
    let body: Value = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR).await?;
    assert_eq!(body["error"], "push_failed");

    ws.close().await?;
    Ok(())
}

#[tokio::test]
async fn test_send_push_rejects_bad_body() -> Result<()> {
    let server = TestServer::start().await?;

    // Missing field
    let response = server
        .post("/sendPush", &json!({"to": "doctor", "from": "patient"}))
        .await?;
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await?;
    assert!(body["error"].as_str().is_some_and(|m| !m.is_empty()));

    // Empty field
    let response = server
        .post(
            "/sendPush",
            &json!({"to": "", "from": "patient", "channel": "room1"}),
        )
        .await?;
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await?;
    assert!(body["error"].as_str().is_some_and(|m| !m.is_empty()));

    assert!(server.push.sent().is_empty());
    Ok(())
}
