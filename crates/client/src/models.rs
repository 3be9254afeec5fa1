//! Wire and result types for the identity and account endpoints.

use std::collections::HashMap;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Token pair body returned by the login and refresh endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenPairResponse {
    pub(crate) access_token: String,
    pub(crate) refresh_token: String,
}

/// Result of a successful [`login`](crate::AuthManager::login).
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    /// Time until literal expiry of the adopted session.
    pub expires_in: Duration,
    /// The session came from a refresh-token exchange.
    pub via_token_refresh: bool,
    /// The supplied access token was adopted without a network call.
    pub via_access_token: bool,
}

/// Account profile of the authenticated rider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Fields not modelled above, kept verbatim.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Stored-value balance of the authenticated rider's account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredValueBalance {
    /// Balance in minor currency units.
    #[serde(default)]
    pub balance: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pair_response_requires_both_tokens() {
        let ok: Result<TokenPairResponse, _> =
            serde_json::from_str(r#"{"accessToken":"a","refreshToken":"r"}"#);
        assert!(ok.is_ok());

        let missing: Result<TokenPairResponse, _> =
            serde_json::from_str(r#"{"accessToken":"a"}"#);
        assert!(missing.is_err());

        let wrong_type: Result<TokenPairResponse, _> =
            serde_json::from_str(r#"{"accessToken":1,"refreshToken":"r"}"#);
        assert!(wrong_type.is_err());
    }

    #[test]
    fn test_profile_keeps_unknown_fields() {
        let profile: AccountProfile = serde_json::from_str(
            r#"{"id":"42","email":"rider@example.com","loyaltyTier":"gold"}"#,
        )
        .unwrap();
        assert_eq!(profile.email.as_deref(), Some("rider@example.com"));
        assert_eq!(profile.extra["loyaltyTier"], "gold");
    }

    #[test]
    fn test_balance_parses_minor_units() {
        let balance: StoredValueBalance =
            serde_json::from_str(r#"{"balance":1250,"currency":"USD"}"#).unwrap();
        assert_eq!(balance.balance, Some(1250));
        assert_eq!(balance.currency.as_deref(), Some("USD"));
        assert!(balance.extra.is_empty());
    }
}
