//! Command execution.
//!
//! Each command builds a fresh manager, authenticates as needed, and writes
//! one JSON document to stdout. Logs go to stderr.

use anyhow::{Context, Result};
use secrecy::ExposeSecret;
use serde::Serialize;
use transit_auth::{AuthManager, LoginOutcome, RegistrationRequest};

use crate::args::{Commands, CredentialArgs};

#[derive(Serialize)]
struct LoginOutput<'a> {
    access_token: &'a str,
    refresh_token: &'a str,
    expires_in_seconds: u64,
    via_token_refresh: bool,
    via_access_token: bool,
}

impl<'a> From<&'a LoginOutcome> for LoginOutput<'a> {
    fn from(outcome: &'a LoginOutcome) -> Self {
        Self {
            access_token: outcome.access_token.expose_secret(),
            refresh_token: outcome.refresh_token.expose_secret(),
            expires_in_seconds: outcome.expires_in.as_secs(),
            via_token_refresh: outcome.via_token_refresh,
            via_access_token: outcome.via_access_token,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}

async fn login(manager: &AuthManager, credentials: CredentialArgs) -> Result<LoginOutcome> {
    manager
        .login(credentials.into_input())
        .await
        .context("Failed to log in")
}

pub async fn run(manager: &AuthManager, command: Commands) -> Result<()> {
    match command {
        Commands::Login {
            credentials,
            revoke_other_tokens,
            fcm_token,
        } => {
            let mut input = credentials.into_input();
            if revoke_other_tokens {
                input = input.with_revoke_other_tokens(true);
            }
            if let Some(fcm_token) = fcm_token {
                input = input.with_fcm_token(fcm_token);
            }
            let outcome = manager.login(input).await.context("Failed to log in")?;
            print_json(&LoginOutput::from(&outcome))
        }
        Commands::Token { credentials } => {
            login(manager, credentials).await?;
            let token = manager
                .get_access_token()
                .await
                .context("Failed to obtain an access token")?;
            print_json(&serde_json::json!({ "access_token": token.expose_secret() }))
        }
        Commands::Profile { credentials } => {
            login(manager, credentials).await?;
            let profile = manager.profile().await.context("Failed to fetch profile")?;
            print_json(&profile)
        }
        Commands::Balance { credentials } => {
            login(manager, credentials).await?;
            let balance = manager.balance().await.context("Failed to fetch balance")?;
            print_json(&balance)
        }
        Commands::Logout { credentials } => {
            login(manager, credentials).await?;
            manager.logout().await;
            print_json(&serde_json::json!({ "logged_out": true }))
        }
        Commands::Register {
            email,
            password,
            confirm_password,
        } => {
            let request = RegistrationRequest::new(email, password, confirm_password);
            manager
                .register(&request)
                .await
                .context("Failed to register account")?;
            print_json(&serde_json::json!({ "registered": request.email }))
        }
    }
}
