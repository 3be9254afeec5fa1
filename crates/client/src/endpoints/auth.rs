//! Login, refresh and logout endpoints.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use crate::credentials::PasswordCredentials;
use crate::endpoints::request::{parse_json, send_request};
use crate::error::{ClientError, Result};
use crate::models::TokenPairResponse;
use crate::session::TokenPair;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    revoke_other_tokens: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fcm_token: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenBody<'a> {
    refresh_token: &'a str,
}

/// Convert a token pair body, rejecting empty tokens.
fn into_token_pair(response: TokenPairResponse, endpoint: &'static str) -> Result<TokenPair> {
    if response.access_token.is_empty() || response.refresh_token.is_empty() {
        return Err(ClientError::ShapeMismatch {
            endpoint,
            message: "token pair contains an empty token".to_string(),
        });
    }
    Ok(TokenPair::new(response.access_token, response.refresh_token))
}

/// Exchange username and password for a token pair.
pub(crate) async fn login(
    client: &Client,
    base_url: &str,
    path: &str,
    credentials: &PasswordCredentials,
) -> Result<TokenPair> {
    debug!(username = %credentials.username, "Logging in with password");

    let body = LoginBody {
        username: &credentials.username,
        password: credentials.password.expose_secret(),
        revoke_other_tokens: credentials.revoke_other_tokens,
        fcm_token: credentials.fcm_token.as_deref(),
    };
    let url = format!("{}{}", base_url, path);
    let response = send_request(client.post(&url).json(&body)).await?;
    let tokens: TokenPairResponse = parse_json(response, "login").await?;
    into_token_pair(tokens, "login")
}

/// Exchange a refresh token for a new token pair.
pub(crate) async fn refresh(
    client: &Client,
    base_url: &str,
    path: &str,
    refresh_token: &SecretString,
) -> Result<TokenPair> {
    debug!("Exchanging refresh token");

    let body = RefreshTokenBody {
        refresh_token: refresh_token.expose_secret(),
    };
    let url = format!("{}{}", base_url, path);
    let response = send_request(client.post(&url).json(&body)).await?;
    let tokens: TokenPairResponse = parse_json(response, "refresh").await?;
    into_token_pair(tokens, "refresh")
}

/// Notify the service that `refresh_token` is no longer in use.
///
/// The response body is ignored.
pub(crate) async fn logout(
    client: &Client,
    base_url: &str,
    path: &str,
    refresh_token: &SecretString,
) -> Result<()> {
    let body = RefreshTokenBody {
        refresh_token: refresh_token.expose_secret(),
    };
    let url = format!("{}{}", base_url, path);
    send_request(client.post(&url).json(&body)).await?;
    Ok(())
}
