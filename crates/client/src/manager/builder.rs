//! Builder for constructing [`AuthManager`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for manager configuration
//! - Normalizing the base URL (removing trailing slashes)
//! - Installing the identification headers as default headers on the HTTP client
//! - Configuring the underlying HTTP client (timeouts, redirects, TLS verification)
//!
//! # Invariants
//! - `base_url` is required and must be provided before calling `build()`
//! - The base URL is always normalized to have no trailing slashes
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::TimeDelta;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use transit_config::{
    ClientIdentity, Config, EndpointPaths,
    constants::{
        DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS,
        DEFAULT_TOKEN_LIFETIME_SECS, HEADER_APPLICATION_ID, HEADER_TENANT_ID,
    },
};

use super::{AuthManager, SessionState};
use crate::error::{ClientError, Result};
use crate::session::SessionTiming;

/// Builder for creating a new [`AuthManager`].
///
/// Every option except `base_url` has a default.
///
/// ```rust,ignore
/// let manager = AuthManager::builder()
///     .base_url("https://id.example-transit.com".to_string())
///     .expiry_buffer(Duration::from_secs(60))
///     .build()?;
/// ```
#[derive(Debug)]
pub struct AuthManagerBuilder {
    base_url: Option<String>,
    skip_verify: bool,
    timeout: Duration,
    expiry_buffer: Duration,
    default_token_lifetime: Duration,
    identity: ClientIdentity,
    endpoints: EndpointPaths,
}

impl Default for AuthManagerBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            expiry_buffer: Duration::from_secs(DEFAULT_EXPIRY_BUFFER_SECS),
            default_token_lifetime: Duration::from_secs(DEFAULT_TOKEN_LIFETIME_SECS),
            identity: ClientIdentity::default(),
            endpoints: EndpointPaths::default(),
        }
    }
}

impl AuthManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the identity service. Trailing slashes are removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this against development servers.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the margin before literal expiry at which a session counts as expired.
    ///
    /// Default is 2 minutes.
    pub fn expiry_buffer(mut self, buffer: Duration) -> Self {
        self.expiry_buffer = buffer;
        self
    }

    /// Set the lifetime assumed when an access token has no readable `exp` claim.
    ///
    /// Default is 15 minutes.
    pub fn default_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.default_token_lifetime = lifetime;
        self
    }

    pub fn identity(mut self, identity: ClientIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn endpoints(mut self, endpoints: EndpointPaths) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Create a manager builder from loaded configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.expiry_buffer = config.session.expiry_buffer();
        self.default_token_lifetime = config.session.default_token_lifetime();
        self.identity = config.identity.clone();
        self.endpoints = config.endpoints.clone();
        self
    }

    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    fn default_headers(identity: &ClientIdentity) -> Result<HeaderMap> {
        let pairs = [
            (ACCEPT, identity.accept.as_str()),
            (header_name(HEADER_APPLICATION_ID)?, identity.application_id.as_str()),
            (ACCEPT_LANGUAGE, identity.locale.as_str()),
            (USER_AGENT, identity.user_agent.as_str()),
            (header_name(HEADER_TENANT_ID)?, identity.tenant_id.as_str()),
        ];

        let mut headers = HeaderMap::with_capacity(pairs.len());
        for (name, value) in pairs {
            let value = HeaderValue::from_str(value).map_err(|e| {
                ClientError::InvalidConfig(format!("invalid value for header {name}: {e}"))
            })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    /// Build the [`AuthManager`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided.
    /// Returns [`ClientError::InvalidConfig`] for unrepresentable header values or durations,
    /// or when the default token lifetime does not exceed the expiry buffer.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<AuthManager> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let timing = SessionTiming {
            expiry_buffer: time_delta(self.expiry_buffer, "expiry_buffer")?,
            default_lifetime: time_delta(self.default_token_lifetime, "default_token_lifetime")?,
        };
        if timing.default_lifetime <= timing.expiry_buffer {
            return Err(ClientError::InvalidConfig(format!(
                "default_token_lifetime ({}s) must be greater than expiry_buffer ({}s)",
                timing.default_lifetime.num_seconds(),
                timing.expiry_buffer.num_seconds()
            )));
        }

        let mut http_builder = reqwest::Client::builder()
            .default_headers(Self::default_headers(&self.identity)?)
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(AuthManager {
            http,
            base_url,
            endpoints: self.endpoints,
            timing,
            state: Arc::new(Mutex::new(SessionState::default())),
        })
    }
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| ClientError::InvalidConfig(format!("invalid header name {name}: {e}")))
}

fn time_delta(duration: Duration, field: &str) -> Result<TimeDelta> {
    TimeDelta::from_std(duration)
        .map_err(|_| ClientError::InvalidConfig(format!("{field} is out of range")))
}
