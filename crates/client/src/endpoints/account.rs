//! Account endpoints: registration and authenticated account reads.

use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::debug;

use crate::credentials::RegistrationRequest;
use crate::endpoints::request::{parse_json, send_request};
use crate::error::Result;
use crate::models::{AccountProfile, StoredValueBalance};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody<'a> {
    email: &'a str,
    password: &'a str,
    confirm_password: &'a str,
}

/// Create a new account. The success body is empty and ignored.
pub(crate) async fn register(
    client: &Client,
    base_url: &str,
    path: &str,
    request: &RegistrationRequest,
) -> Result<()> {
    debug!(email = %request.email, "Registering account");

    let body = RegisterBody {
        email: &request.email,
        password: request.password.expose_secret(),
        confirm_password: request.confirm_password.expose_secret(),
    };
    let url = format!("{}{}", base_url, path);
    send_request(client.post(&url).json(&body)).await?;
    Ok(())
}

/// Fetch the profile of the account owning `access_token`.
pub(crate) async fn get_profile(
    client: &Client,
    base_url: &str,
    path: &str,
    access_token: &str,
) -> Result<AccountProfile> {
    let url = format!("{}{}", base_url, path);
    let response = send_request(client.get(&url).bearer_auth(access_token)).await?;
    parse_json(response, "profile").await
}

/// Fetch the stored-value balance of the account owning `access_token`.
pub(crate) async fn get_balance(
    client: &Client,
    base_url: &str,
    path: &str,
    access_token: &str,
) -> Result<StoredValueBalance> {
    let url = format!("{}{}", base_url, path);
    let response = send_request(client.get(&url).bearer_auth(access_token)).await?;
    parse_json(response, "balance").await
}
