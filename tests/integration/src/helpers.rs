//! Test helpers for integration tests
//!
//! Provides utilities for spawning the gateway on an ephemeral port, driving
//! it over HTTP and WebSocket, and observing push submissions through a
//! recording sender injected behind the delivery seam.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use relay_common::{
    AppConfig, AppSettings, Environment, PushConfig, RtcConfig, RtcTokenIssuer, ServerConfig,
};
use relay_gateway::connection::PresenceRegistry;
use relay_gateway::{create_app, GatewayState};
use relay_notify::{PushError, PushNotification, PushSender};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Secret shared between the spawned server and test-side token decoding
pub const TEST_SECRET: &str = "test-secret-key-that-is-long-enough";

/// How long to wait for an expected WebSocket event
const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to listen when asserting that nothing arrives
const SILENCE_WINDOW: Duration = Duration::from_millis(300);

/// Push sender that records submissions instead of calling out
#[derive(Default)]
pub struct RecordingPushSender {
    sent: Mutex<Vec<PushNotification>>,
    fail: AtomicBool,
}

impl RecordingPushSender {
    /// All notifications submitted so far
    pub fn sent(&self) -> Vec<PushNotification> {
        self.sent.lock().expect("push log poisoned").clone()
    }

    /// Make subsequent submissions fail like a rejecting collaborator
    pub fn fail_next(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PushSender for RecordingPushSender {
    async fn send(&self, notification: &PushNotification) -> Result<(), PushError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PushError::Delivery { status: 502 });
        }
        self.sent
            .lock()
            .expect("push log poisoned")
            .push(notification.clone());
        Ok(())
    }
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub push: Arc<RecordingPushSender>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on an ephemeral port
    pub async fn start() -> Result<Self> {
        let config = test_config();
        let push = Arc::new(RecordingPushSender::default());

        let registry = PresenceRegistry::new_shared();
        let token_issuer = Arc::new(RtcTokenIssuer::new(
            config.rtc.app_id.clone(),
            &config.rtc.app_secret,
            config.rtc.token_ttl,
        ));
        let state = GatewayState::new(registry, token_issuer, push.clone(), config);
        let app = create_app(state);

        // Bind to an ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Create HTTP client
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            push,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the WebSocket URL
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Open a WebSocket client against this server
    pub async fn ws_connect(&self) -> Result<WsClient> {
        WsClient::connect(&self.ws_url()).await
    }
}

/// Create a test configuration (never read from the environment)
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "call-relay-test".to_string(),
            env: Environment::Development,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        rtc: RtcConfig {
            app_id: "test-app".to_string(),
            app_secret: TEST_SECRET.to_string(),
            token_ttl: 3600,
        },
        push: PushConfig {
            // Never contacted: tests inject RecordingPushSender instead
            endpoint: "http://127.0.0.1:9/push".to_string(),
        },
    }
}

/// One WebSocket client session
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl WsClient {
    /// Connect to the given WebSocket URL
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, _) = connect_async(url).await?;
        Ok(Self { stream })
    }

    /// Send a named event with a JSON payload
    pub async fn send_event(&mut self, event: &str, data: Value) -> Result<()> {
        let frame = serde_json::json!({ "event": event, "data": data });
        self.stream.send(Message::Text(frame.to_string())).await?;
        Ok(())
    }

    /// Send a raw text frame
    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.stream.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Receive the next event, skipping non-text frames
    pub async fn recv_event(&mut self) -> Result<(String, Value)> {
        let deadline = timeout(RECV_TIMEOUT, async {
            loop {
                match self.stream.next().await {
                    Some(Ok(Message::Text(text))) => {
                        let frame: Value = serde_json::from_str(&text)?;
                        let event = frame["event"]
                            .as_str()
                            .ok_or_else(|| anyhow!("frame without event: {text}"))?
                            .to_string();
                        let data = frame.get("data").cloned().unwrap_or(Value::Null);
                        return Ok((event, data));
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => bail!("websocket error: {e}"),
                    None => bail!("websocket closed"),
                }
            }
        });

        deadline.await.map_err(|_| anyhow!("timed out waiting for event"))?
    }

    /// Assert that no event arrives within the silence window
    pub async fn expect_silence(&mut self) -> Result<()> {
        match timeout(SILENCE_WINDOW, self.stream.next()).await {
            Err(_) => Ok(()),
            Ok(Some(Ok(Message::Text(text)))) => bail!("unexpected event: {text}"),
            Ok(Some(Ok(_))) => Ok(()),
            Ok(Some(Err(e))) => bail!("websocket error: {e}"),
            Ok(None) => Ok(()),
        }
    }

    /// Close the connection
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await.ok();
        Ok(())
    }
}

/// Let in-flight registrations land before acting from another connection
///
/// Events on one socket are ordered, but cross-connection visibility needs a
/// beat since there is no acknowledgement event in the protocol.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(150)).await;
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}
