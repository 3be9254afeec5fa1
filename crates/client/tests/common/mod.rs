//! Common test utilities for integration tests.
//!
//! # What this does NOT handle
//! - Mock expectations (set up with wiremock directly in tests)

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{TimeDelta, Utc};

#[allow(unused_imports)]
pub use transit_auth::{AuthManager, ClientError, CredentialInput, TokenPair};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build an unsigned JWT whose `exp` claim lies `delta` from now.
#[allow(dead_code)]
pub fn jwt_expiring_in(delta: TimeDelta) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = format!(
        r#"{{"sub":"rider-1","exp":{}}}"#,
        (Utc::now() + delta).timestamp()
    );
    format!("{}.{}.", header, URL_SAFE_NO_PAD.encode(payload))
}

/// Build an unsigned JWT with a literal `exp` claim (seconds since epoch).
#[allow(dead_code)]
pub fn jwt_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = format!(r#"{{"sub":"rider-1","exp":{}}}"#, exp);
    format!("{}.{}.", header, URL_SAFE_NO_PAD.encode(payload))
}

/// Token pair body as returned by the login and refresh endpoints.
#[allow(dead_code)]
pub fn token_pair_body(access_token: &str, refresh_token: &str) -> serde_json::Value {
    serde_json::json!({
        "accessToken": access_token,
        "refreshToken": refresh_token,
    })
}

/// Manager pointed at `server`, with default session timing.
#[allow(dead_code)]
pub fn manager_for(server: &MockServer) -> AuthManager {
    AuthManager::builder()
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .build()
        .expect("manager should build")
}

/// Store a session for `refresh_token` that is already past its expiry.
#[allow(dead_code)]
pub fn store_expired_session(manager: &AuthManager, refresh_token: &str) {
    manager.store(
        TokenPair::new("stale-access", refresh_token),
        Some(Utc::now() - TimeDelta::minutes(1)),
    );
}

/// Store a session that stays valid for `delta`.
#[allow(dead_code)]
pub fn store_valid_session(manager: &AuthManager, access_token: &str, delta: TimeDelta) {
    manager.store(
        TokenPair::new(access_token, "refresh-valid"),
        Some(Utc::now() + delta),
    );
}
