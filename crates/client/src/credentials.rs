//! Login and registration inputs and their local validation.
//!
//! A [`CredentialInput`] is accepted as given and checked once, before any
//! strategy runs, against the three legal shapes:
//!
//! - `{username, password, revokeOtherTokens?, fcmToken?}`
//! - `{refreshToken}`
//! - `{accessToken, refreshToken}`
//!
//! Blank strings count as absent. An input that matches none of the shapes is
//! rejected with [`ClientError::Validation`] without touching the network.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{ClientError, Result};

/// Raw login input. Any combination of fields may be set; see the module docs
/// for which combinations are accepted.
#[derive(Debug, Clone, Default)]
pub struct CredentialInput {
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub revoke_other_tokens: Option<bool>,
    pub fcm_token: Option<String>,
    pub refresh_token: Option<SecretString>,
    pub access_token: Option<SecretString>,
}

impl CredentialInput {
    /// Username and password login.
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(SecretString::new(password.into().into())),
            ..Self::default()
        }
    }

    /// Refresh-token exchange.
    pub fn refresh_token(refresh_token: impl Into<String>) -> Self {
        Self::default().with_refresh_token(refresh_token)
    }

    /// Access-token reuse, backed by a refresh token.
    pub fn token_pair(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self::default()
            .with_access_token(access_token)
            .with_refresh_token(refresh_token)
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(SecretString::new(refresh_token.into().into()));
        self
    }

    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(SecretString::new(access_token.into().into()));
        self
    }

    /// Ask the service to revoke every other token issued to this account.
    pub fn with_revoke_other_tokens(mut self, revoke: bool) -> Self {
        self.revoke_other_tokens = Some(revoke);
        self
    }

    /// Push-notification registration token forwarded on password login.
    pub fn with_fcm_token(mut self, fcm_token: impl Into<String>) -> Self {
        self.fcm_token = Some(fcm_token.into());
        self
    }
}

/// Username/password login request, with its optional extras.
#[derive(Debug, Clone)]
pub(crate) struct PasswordCredentials {
    pub(crate) username: String,
    pub(crate) password: SecretString,
    pub(crate) revoke_other_tokens: Option<bool>,
    pub(crate) fcm_token: Option<String>,
}

/// Credentials that matched at least one legal shape.
#[derive(Debug, Clone)]
pub(crate) struct LoginCredentials {
    password: Option<PasswordCredentials>,
    refresh_token: Option<SecretString>,
    access_token: Option<SecretString>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn present_secret(value: Option<SecretString>) -> Option<SecretString> {
    value.filter(|v| !v.expose_secret().trim().is_empty())
}

impl TryFrom<CredentialInput> for LoginCredentials {
    type Error = ClientError;

    fn try_from(input: CredentialInput) -> Result<Self> {
        let username = present(input.username);
        let password = present_secret(input.password);
        let refresh_token = present_secret(input.refresh_token);
        let access_token = present_secret(input.access_token);

        let password = match (username, password) {
            (Some(username), Some(password)) => Some(PasswordCredentials {
                username,
                password,
                revoke_other_tokens: input.revoke_other_tokens,
                fcm_token: present(input.fcm_token),
            }),
            _ => None,
        };

        if password.is_none() && refresh_token.is_none() {
            return Err(ClientError::Validation(
                "credentials must contain username and password, a refresh token, \
                 or an access token together with a refresh token"
                    .to_string(),
            ));
        }

        Ok(Self {
            password,
            refresh_token,
            access_token,
        })
    }
}

impl LoginCredentials {
    /// Access and refresh token, when both were supplied.
    pub(crate) fn token_pair(&self) -> Option<(&SecretString, &SecretString)> {
        self.access_token.as_ref().zip(self.refresh_token.as_ref())
    }

    pub(crate) fn refresh_token(&self) -> Option<&SecretString> {
        self.refresh_token.as_ref()
    }

    pub(crate) fn password(&self) -> Option<&PasswordCredentials> {
        self.password.as_ref()
    }
}

/// New account registration request.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl RegistrationRequest {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into().into()),
            confirm_password: SecretString::new(confirm_password.into().into()),
        }
    }

    /// Client-detectable mistakes, checked before any request is sent.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(ClientError::Validation("email is required".to_string()));
        }
        if self.password.expose_secret().is_empty() {
            return Err(ClientError::Validation("password is required".to_string()));
        }
        if self.password.expose_secret() != self.confirm_password.expose_secret() {
            return Err(ClientError::Validation(
                "password and confirmation do not match".to_string(),
            ));
        }
        Ok(())
    }
}
