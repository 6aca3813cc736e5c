//! Application configuration structs
//!
//! Loads configuration from environment variables. Every setting has a
//! development-safe default; shared deployments must override the signing
//! secret (enforced for the production environment).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub rtc: RtcConfig,
    pub push: PushConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Media-transport credential configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RtcConfig {
    #[serde(default = "default_rtc_app_id")]
    pub app_id: String,
    #[serde(default = "default_rtc_app_secret")]
    pub app_secret: String,
    #[serde(default = "default_rtc_token_ttl")]
    pub token_ttl: i64,
}

/// Push-delivery collaborator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PushConfig {
    #[serde(default = "default_push_endpoint")]
    pub endpoint: String,
}

// Default value functions
fn default_app_name() -> String {
    "call-relay".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_rtc_app_id() -> String {
    "dev-app".to_string()
}

fn default_rtc_app_secret() -> String {
    "dev-secret-change-me".to_string()
}

fn default_rtc_token_ttl() -> i64 {
    3600
}

fn default_push_endpoint() -> String {
    "https://exp.host/--/api/v2/push/send".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error on malformed values, or when the production
    /// environment still carries the development signing secret.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let config = Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            server: ServerConfig {
                host: env::var("RELAY_HOST").unwrap_or_else(|_| default_host()),
                port: match env::var("RELAY_PORT") {
                    Ok(s) => s
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("RELAY_PORT", s))?,
                    Err(_) => default_port(),
                },
            },
            rtc: RtcConfig {
                app_id: env::var("RTC_APP_ID").unwrap_or_else(|_| default_rtc_app_id()),
                app_secret: env::var("RTC_APP_SECRET").unwrap_or_else(|_| default_rtc_app_secret()),
                token_ttl: match env::var("RTC_TOKEN_TTL") {
                    Ok(s) => s
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("RTC_TOKEN_TTL", s))?,
                    Err(_) => default_rtc_token_ttl(),
                },
            },
            push: PushConfig {
                endpoint: env::var("PUSH_ENDPOINT").unwrap_or_else(|_| default_push_endpoint()),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Reject configurations that are unsafe outside local development
    fn validate(&self) -> Result<(), ConfigError> {
        if self.app.env.is_production() && self.rtc.app_secret == default_rtc_app_secret() {
            return Err(ConfigError::InsecureDefault("RTC_APP_SECRET"));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("{0} still has its development default; it must be overridden in production")]
    InsecureDefault(&'static str),
}
