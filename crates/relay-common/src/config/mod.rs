//! Configuration module

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, Environment, PushConfig, RtcConfig, ServerConfig,
};
