//! Session record and expiry bookkeeping.
//!
//! A [`Session`] is the single live token pair plus its absolute expiry
//! instant. It is never edited in place: every (re)issue builds a new value
//! that replaces the previous one wholesale.

use chrono::{DateTime, TimeDelta, Utc};
use secrecy::{ExposeSecret, SecretString};

use crate::claims::unverified_expiry;

/// Access and refresh token pair issued by the identity service.
#[derive(Debug, Clone)]
pub struct TokenPair {
    access: SecretString,
    refresh: SecretString,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: SecretString::new(access.into().into()),
            refresh: SecretString::new(refresh.into().into()),
        }
    }

    pub(crate) fn from_secrets(access: SecretString, refresh: SecretString) -> Self {
        Self { access, refresh }
    }

    pub fn access_token(&self) -> &SecretString {
        &self.access
    }

    pub fn refresh_token(&self) -> &SecretString {
        &self.refresh
    }
}

/// Buffer and fallback lifetime used to derive and test session expiry.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionTiming {
    pub(crate) expiry_buffer: TimeDelta,
    pub(crate) default_lifetime: TimeDelta,
}

/// The live token pair plus its derived absolute expiry.
#[derive(Debug, Clone)]
pub(crate) struct Session {
    tokens: TokenPair,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Build a session, deriving expiry from the access token when no override is given.
    ///
    /// Falls back to `now + default_lifetime` when the token carries no readable
    /// expiry claim.
    pub(crate) fn derive(
        tokens: TokenPair,
        expires_at_override: Option<DateTime<Utc>>,
        default_lifetime: TimeDelta,
        now: DateTime<Utc>,
    ) -> Self {
        let expires_at = expires_at_override
            .or_else(|| unverified_expiry(tokens.access.expose_secret()))
            .unwrap_or_else(|| {
                now.checked_add_signed(default_lifetime)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC)
            });
        Self { tokens, expires_at }
    }

    /// A copy of this session that is already past its expiry.
    pub(crate) fn expired(self) -> Self {
        Self {
            tokens: self.tokens,
            expires_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// `now < expires_at - buffer`. An unrepresentable threshold counts as invalid.
    pub(crate) fn is_valid_at(&self, now: DateTime<Utc>, buffer: TimeDelta) -> bool {
        self.expires_at
            .checked_sub_signed(buffer)
            .is_some_and(|threshold| now < threshold)
    }

    /// Time left until literal expiry, saturating at zero.
    pub(crate) fn remaining_at(&self, now: DateTime<Utc>) -> std::time::Duration {
        (self.expires_at - now).to_std().unwrap_or_default()
    }

    pub(crate) fn tokens(&self) -> &TokenPair {
        &self.tokens
    }

    pub(crate) fn access_token(&self) -> &str {
        self.tokens.access.expose_secret()
    }

    pub(crate) fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Redacted, read-only view of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInfo {
    /// Literal expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Time left until literal expiry.
    pub expires_in: std::time::Duration,
    /// Whether the session is valid once the expiry buffer is applied.
    pub valid: bool,
}

/// Position of the manager in its session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No session.
    Anonymous,
    /// A session is held (it may be stale until the next token request).
    Authenticated,
    /// A coordinated refresh is in flight.
    Refreshing,
}
