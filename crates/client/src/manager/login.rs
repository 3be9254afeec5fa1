//! Login strategy selection.
//!
//! Strategies are tried in a fixed order, each only when the credentials make
//! it eligible:
//!
//! 1. Access-token reuse: adopt the supplied access token if its unverified
//!    `exp` is still outside the expiry buffer. No network call.
//! 2. Refresh exchange: trade the supplied refresh token for a new pair.
//!    A failure here falls through to the next strategy.
//! 3. Password login. A failure here is final.
//!
//! When nothing succeeded and password login was not eligible the result is
//! [`ClientError::NoEligibleStrategy`], carrying the last strategy error.

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use super::AuthManager;
use crate::claims::unverified_expiry;
use crate::credentials::{CredentialInput, LoginCredentials, PasswordCredentials};
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::LoginOutcome;
use crate::session::{Session, TokenPair};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    AccessToken,
    TokenRefresh,
    Password,
}

impl AuthManager {
    /// Authenticate with whichever supplied credentials work first.
    ///
    /// Input that matches none of the accepted shapes fails with
    /// [`ClientError::Validation`] before any network call. On success the
    /// session is replaced and any in-flight refresh is detached.
    pub async fn login(&self, input: CredentialInput) -> Result<LoginOutcome> {
        let credentials = LoginCredentials::try_from(input)?;

        if let Some(session) = self.reuse_access_token(&credentials) {
            return Ok(self.adopt(session, Strategy::AccessToken));
        }

        let mut last_error = None;

        if let Some(refresh_token) = credentials.refresh_token() {
            match self.exchange_refresh_token(refresh_token).await {
                Ok(tokens) => return Ok(self.adopt_tokens(tokens, Strategy::TokenRefresh)),
                Err(e) => {
                    debug!(error = %e, "Refresh-token login failed, trying next strategy");
                    last_error = Some(Box::new(e));
                }
            }
        }

        match credentials.password() {
            Some(password) => {
                let tokens = self.password_login(password).await?;
                Ok(self.adopt_tokens(tokens, Strategy::Password))
            }
            None => Err(ClientError::NoEligibleStrategy { last_error }),
        }
    }

    /// Build a session from a supplied token pair whose access token is still fresh.
    fn reuse_access_token(&self, credentials: &LoginCredentials) -> Option<Session> {
        let (access, refresh) = credentials.token_pair()?;
        let now = Utc::now();

        let tokens = TokenPair::from_secrets(access.clone(), refresh.clone());
        let expires_at = unverified_expiry(access.expose_secret())?;
        let session = Session::derive(tokens, Some(expires_at), self.timing.default_lifetime, now);

        if session.is_valid_at(now, self.timing.expiry_buffer) {
            Some(session)
        } else {
            debug!(expires_at = %expires_at, "Supplied access token is stale, not reusing");
            None
        }
    }

    async fn exchange_refresh_token(&self, refresh_token: &SecretString) -> Result<TokenPair> {
        endpoints::refresh(
            &self.http,
            &self.base_url,
            &self.endpoints.refresh,
            refresh_token,
        )
        .await
    }

    async fn password_login(&self, password: &PasswordCredentials) -> Result<TokenPair> {
        endpoints::login(&self.http, &self.base_url, &self.endpoints.login, password)
            .await
            .map_err(|e| match e {
                ClientError::ApiError {
                    status, message, ..
                } => ClientError::LoginFailed { status, message },
                ClientError::ShapeMismatch { message, .. } => ClientError::LoginFailed {
                    status: 200,
                    message,
                },
                other => other,
            })
    }

    fn adopt_tokens(&self, tokens: TokenPair, strategy: Strategy) -> LoginOutcome {
        let session = Session::derive(tokens, None, self.timing.default_lifetime, Utc::now());
        self.adopt(session, strategy)
    }

    fn adopt(&self, session: Session, strategy: Strategy) -> LoginOutcome {
        let session = self.install(session);
        info!(?strategy, "Logged in");

        let tokens = session.tokens();
        LoginOutcome {
            access_token: tokens.access_token().clone(),
            refresh_token: tokens.refresh_token().clone(),
            expires_in: session.remaining_at(Utc::now()),
            via_token_refresh: strategy == Strategy::TokenRefresh,
            via_access_token: strategy == Strategy::AccessToken,
        }
    }
}
