//! Centralized constants for the transit auth workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Session Timing
// =============================================================================

/// Margin before literal token expiry at which a session is treated as expired (2 minutes).
pub const DEFAULT_EXPIRY_BUFFER_SECS: u64 = 120;

/// Lifetime assumed for an access token whose expiry claim cannot be read (15 minutes).
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 900;

/// Maximum allowed fallback token lifetime in seconds (24 hours).
pub const MAX_TOKEN_LIFETIME_SECS: u64 = 86400;

// =============================================================================
// Identification Headers
// =============================================================================

/// Header carrying the client application identifier.
pub const HEADER_APPLICATION_ID: &str = "X-Application-Id";

/// Header carrying the tenant identifier.
pub const HEADER_TENANT_ID: &str = "X-Tenant-Id";

/// Default `Accept` header value.
pub const DEFAULT_ACCEPT: &str = "application/json";

/// Default client application identifier.
pub const DEFAULT_APPLICATION_ID: &str = "transit-auth";

/// Default `Accept-Language` header value.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Default tenant identifier.
pub const DEFAULT_TENANT_ID: &str = "default";

// =============================================================================
// Endpoint Paths
// =============================================================================

pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";
pub const DEFAULT_REFRESH_PATH: &str = "/auth/refresh";
pub const DEFAULT_LOGOUT_PATH: &str = "/auth/logout";
pub const DEFAULT_REGISTER_PATH: &str = "/accounts/register";
pub const DEFAULT_PROFILE_PATH: &str = "/accounts/me";
pub const DEFAULT_BALANCE_PATH: &str = "/accounts/me/balance";

/// Default `User-Agent` header value, derived from the crate version.
pub fn default_user_agent() -> String {
    format!("transit-auth/{}", env!("CARGO_PKG_VERSION"))
}
