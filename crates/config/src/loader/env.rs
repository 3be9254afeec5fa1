//! Environment variable parsing for configuration.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed.
//! - Invalid numeric or boolean values return `ConfigError::InvalidValue`.

use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse an environment variable, mapping parse failures to `InvalidValue`.
fn parse_env<T: FromStr>(key: &str, expectation: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: expectation.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("TRANSIT_BASE_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(skip) = parse_env::<bool>("TRANSIT_SKIP_VERIFY", "must be true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = parse_env::<u64>("TRANSIT_TIMEOUT", "must be a number")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(buffer) = parse_env::<u64>("TRANSIT_EXPIRY_BUFFER", "must be a number")? {
        loader.set_expiry_buffer_seconds(Some(buffer));
    }
    if let Some(lifetime) = parse_env::<u64>("TRANSIT_TOKEN_LIFETIME", "must be a number")? {
        loader.set_token_lifetime_seconds(Some(lifetime));
    }
    if let Some(app_id) = env_var_or_none("TRANSIT_APP_ID") {
        loader.set_application_id(Some(app_id));
    }
    if let Some(locale) = env_var_or_none("TRANSIT_LOCALE") {
        loader.set_locale(Some(locale));
    }
    if let Some(user_agent) = env_var_or_none("TRANSIT_USER_AGENT") {
        loader.set_user_agent(Some(user_agent));
    }
    if let Some(tenant) = env_var_or_none("TRANSIT_TENANT_ID") {
        loader.set_tenant_id(Some(tenant));
    }
    Ok(())
}
