//! # relay-common
//!
//! Shared utilities including configuration, error handling, credential
//! issuing, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{RtcClaims, RtcRole, RtcToken, RtcTokenIssuer};
pub use config::{AppConfig, AppSettings, ConfigError, Environment, PushConfig, RtcConfig, ServerConfig};
pub use error::{AppError, AppResult};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
