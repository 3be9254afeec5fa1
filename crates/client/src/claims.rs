//! Unverified access-token expiry extraction.
//!
//! The access token is decoded without signature verification. The result
//! feeds only the client-side staleness heuristic (when to refresh) and must
//! never be used to make an authorization or trust decision.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    exp: Option<f64>,
}

/// Read the `exp` claim (seconds since epoch) from the payload segment of
/// `access_token`.
///
/// Returns `None` when the token has no payload segment, the segment is not
/// base64-encoded JSON, or the claim is absent, non-numeric or negative.
pub(crate) fn unverified_expiry(access_token: &str) -> Option<DateTime<Utc>> {
    let payload = access_token.split('.').nth(1)?;
    let payload = payload.trim_end_matches('=');

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload))
        .ok()?;

    let claim: ExpiryClaim = serde_json::from_slice(&bytes).ok()?;
    let exp = claim.exp.filter(|exp| exp.is_finite() && *exp >= 0.0)?;

    DateTime::from_timestamp_millis((exp * 1000.0) as i64)
}
