//! Credential issuing for the external media transport

mod rtc_token;

pub use rtc_token::{RtcClaims, RtcRole, RtcToken, RtcTokenIssuer};
