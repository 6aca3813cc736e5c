//! Value objects - validated wrappers around primitive identifiers

mod channel_name;
mod user_id;

pub use channel_name::ChannelName;
pub use user_id::UserId;
