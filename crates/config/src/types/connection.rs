//! Connection and session timing configuration.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeout).
//! - Define session timing (expiry buffer, fallback token lifetime).
//! - Define the main `Config` structure combining every section.
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - `expiry_buffer_seconds` is strictly smaller than `default_token_lifetime_seconds`
//!   once a config has been produced by `ConfigLoader::build`.

use crate::constants::{
    DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_LIFETIME_SECS,
};
use crate::types::identity::{ClientIdentity, EndpointPaths};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the identity service (e.g., https://id.example-transit.com/api)
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    #[serde(default)]
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
}

/// Session timing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Margin before literal expiry at which a session counts as expired.
    /// Default: 120 seconds
    #[serde(default = "default_expiry_buffer")]
    pub expiry_buffer_seconds: u64,
    /// Lifetime assumed when an access token carries no readable expiry claim.
    /// Default: 900 seconds
    #[serde(default = "default_token_lifetime")]
    pub default_token_lifetime_seconds: u64,
}

pub(crate) fn default_expiry_buffer() -> u64 {
    DEFAULT_EXPIRY_BUFFER_SECS
}

pub(crate) fn default_token_lifetime() -> u64 {
    DEFAULT_TOKEN_LIFETIME_SECS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_buffer_seconds: DEFAULT_EXPIRY_BUFFER_SECS,
            default_token_lifetime_seconds: DEFAULT_TOKEN_LIFETIME_SECS,
        }
    }
}

impl SessionConfig {
    pub fn expiry_buffer(&self) -> Duration {
        Duration::from_secs(self.expiry_buffer_seconds)
    }

    pub fn default_token_lifetime(&self) -> Duration {
        Duration::from_secs(self.default_token_lifetime_seconds)
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Session timing
    #[serde(default)]
    pub session: SessionConfig,
    /// Identification headers sent with every request
    #[serde(default)]
    pub identity: ClientIdentity,
    /// Remote endpoint paths, relative to `connection.base_url`
    #[serde(default)]
    pub endpoints: EndpointPaths,
}

impl Config {
    /// Create a config for `base_url` with every other section at its default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url: base_url.into(),
                skip_verify: false,
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            },
            session: SessionConfig::default(),
            identity: ClientIdentity::default(),
            endpoints: EndpointPaths::default(),
        }
    }
}
