//! Identification headers and endpoint paths.
//!
//! The remote service only accepts requests that carry its expected
//! identification headers, so these values are reproduced verbatim on every
//! outbound call.

use crate::constants::{
    DEFAULT_ACCEPT, DEFAULT_APPLICATION_ID, DEFAULT_BALANCE_PATH, DEFAULT_LOCALE,
    DEFAULT_LOGIN_PATH, DEFAULT_LOGOUT_PATH, DEFAULT_PROFILE_PATH, DEFAULT_REFRESH_PATH,
    DEFAULT_REGISTER_PATH, DEFAULT_TENANT_ID, default_user_agent,
};
use serde::{Deserialize, Serialize};

/// Fixed identification headers attached to every outbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientIdentity {
    /// `Accept` header (content negotiation)
    pub accept: String,
    /// `X-Application-Id` header
    pub application_id: String,
    /// `Accept-Language` header
    pub locale: String,
    /// `User-Agent` header
    pub user_agent: String,
    /// `X-Tenant-Id` header
    pub tenant_id: String,
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self {
            accept: DEFAULT_ACCEPT.to_string(),
            application_id: DEFAULT_APPLICATION_ID.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            user_agent: default_user_agent(),
            tenant_id: DEFAULT_TENANT_ID.to_string(),
        }
    }
}

/// Paths of the remote operations, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointPaths {
    pub login: String,
    pub refresh: String,
    pub logout: String,
    pub register: String,
    pub profile: String,
    pub balance: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            login: DEFAULT_LOGIN_PATH.to_string(),
            refresh: DEFAULT_REFRESH_PATH.to_string(),
            logout: DEFAULT_LOGOUT_PATH.to_string(),
            register: DEFAULT_REGISTER_PATH.to_string(),
            profile: DEFAULT_PROFILE_PATH.to_string(),
            balance: DEFAULT_BALANCE_PATH.to_string(),
        }
    }
}
