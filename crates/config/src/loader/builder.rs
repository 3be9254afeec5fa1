//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Build the final `Config` from loaded values, applying defaults.
//! - Validate URL, timeout and session timing bounds.
//!
//! Invariants / Assumptions:
//! - Later layers overwrite earlier ones; call `from_env()` before builder
//!   overrides to give the builder the last word.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_LIFETIME_SECS,
    MAX_TIMEOUT_SECS, MAX_TOKEN_LIFETIME_SECS,
};
use crate::types::{ClientIdentity, Config, ConnectionConfig, EndpointPaths, SessionConfig};

/// Configuration loader that builds config from environment variables and builder values.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    expiry_buffer_seconds: Option<u64>,
    token_lifetime_seconds: Option<u64>,
    application_id: Option<String>,
    locale: Option<String>,
    user_agent: Option<String>,
    tenant_id: Option<String>,
    endpoints: Option<EndpointPaths>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the `.env` file exists but has invalid syntax
    /// (`ConfigError::DotenvParse`) or cannot be read (`ConfigError::DotenvIo`).
    /// Missing `.env` files are silently ignored.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            tracing::debug!("Skipping .env loading (DOTENV_DISABLED is set)");
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the expiry buffer in seconds.
    pub fn with_expiry_buffer_seconds(mut self, buffer: u64) -> Self {
        self.expiry_buffer_seconds = Some(buffer);
        self
    }

    /// Set the fallback token lifetime in seconds.
    pub fn with_token_lifetime_seconds(mut self, lifetime: u64) -> Self {
        self.token_lifetime_seconds = Some(lifetime);
        self
    }

    /// Set the tenant identifier header value.
    pub fn with_tenant_id(mut self, tenant: String) -> Self {
        self.tenant_id = Some(tenant);
        self
    }

    /// Set the client application identifier header value.
    pub fn with_application_id(mut self, app_id: String) -> Self {
        self.application_id = Some(app_id);
        self
    }

    /// Replace every endpoint path at once.
    pub fn with_endpoints(mut self, endpoints: EndpointPaths) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self
            .base_url
            .as_deref()
            .map(validate_and_normalize_base_url)
            .transpose()?
            .ok_or(ConfigError::MissingBaseUrl)?;

        let connection = ConnectionConfig {
            base_url,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        };

        let session = SessionConfig {
            expiry_buffer_seconds: self
                .expiry_buffer_seconds
                .unwrap_or(DEFAULT_EXPIRY_BUFFER_SECS),
            default_token_lifetime_seconds: self
                .token_lifetime_seconds
                .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS),
        };

        Self::validate_timeout(&connection)?;
        Self::validate_session(&session)?;

        let defaults = ClientIdentity::default();
        let identity = ClientIdentity {
            accept: defaults.accept,
            application_id: self.application_id.unwrap_or(defaults.application_id),
            locale: self.locale.unwrap_or(defaults.locale),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            tenant_id: self.tenant_id.unwrap_or(defaults.tenant_id),
        };

        Ok(Config {
            connection,
            session,
            identity,
            endpoints: self.endpoints.unwrap_or_default(),
        })
    }

    fn validate_timeout(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        Ok(())
    }

    /// Checks that the fallback lifetime outlives the buffer and stays bounded.
    fn validate_session(session: &SessionConfig) -> Result<(), ConfigError> {
        if session.default_token_lifetime_seconds <= session.expiry_buffer_seconds {
            return Err(ConfigError::InvalidSessionLifetime {
                message: format!(
                    "default_token_lifetime_seconds ({}) must be greater than expiry_buffer_seconds ({})",
                    session.default_token_lifetime_seconds, session.expiry_buffer_seconds
                ),
            });
        }

        if session.default_token_lifetime_seconds > MAX_TOKEN_LIFETIME_SECS {
            return Err(ConfigError::InvalidSessionLifetime {
                message: format!(
                    "default_token_lifetime_seconds exceeds maximum allowed value of {} seconds",
                    MAX_TOKEN_LIFETIME_SECS
                ),
            });
        }

        Ok(())
    }

    // Internal setters for use by other loader modules

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_expiry_buffer_seconds(&mut self, buffer: Option<u64>) {
        self.expiry_buffer_seconds = buffer;
    }

    pub(crate) fn set_token_lifetime_seconds(&mut self, lifetime: Option<u64>) {
        self.token_lifetime_seconds = lifetime;
    }

    pub(crate) fn set_application_id(&mut self, app_id: Option<String>) {
        self.application_id = app_id;
    }

    pub(crate) fn set_locale(&mut self, locale: Option<String>) {
        self.locale = locale;
    }

    pub(crate) fn set_user_agent(&mut self, user_agent: Option<String>) {
        self.user_agent = user_agent;
    }

    pub(crate) fn set_tenant_id(&mut self, tenant: Option<String>) {
        self.tenant_id = tenant;
    }
}

/// Validate and normalize a base URL.
///
/// - Treat blank/whitespace-only as missing
/// - Parse as an absolute URL with an http or https scheme and a host
/// - Normalize by stripping trailing slashes
fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!("must be an absolute http(s) URL with a host: {e}"),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
