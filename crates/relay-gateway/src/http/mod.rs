//! HTTP endpoints
//!
//! Credential issuing, push fallback, and health - the non-WebSocket surface
//! of the relay.

mod error;
mod extractors;
mod health;
mod rtc_token;
mod send_push;

pub use error::{ApiError, ApiResult};
pub use extractors::ValidatedJson;
pub use health::health_check;
pub use rtc_token::rtc_token;
pub use send_push::send_push;
