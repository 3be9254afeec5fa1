//! The authentication token lifecycle manager.
//!
//! [`AuthManager`] owns the single live session and is the only writer of it.
//!
//! # Submodules
//! - [`builder`]: Manager construction and configuration
//! - `login`: Login strategy selection (access-token reuse, refresh exchange, password)
//! - `refresh`: Single-flight coordinated refresh behind `get_access_token()`
//! - `account`: Logout, registration and authenticated account reads
//!
//! # Invariants
//! - The session is replaced wholesale under the state lock; readers never see a torn value.
//! - `is_authenticated()` and `state()` are pure reads and never perform I/O.
//! - The state lock is never held across an `.await`.
//! - Every wholesale replacement bumps `generation` and drops the pending refresh
//!   handle, so a refresh started for an older session cannot overwrite a newer one.

pub mod builder;

mod account;
mod login;
mod refresh;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::info;
use transit_config::EndpointPaths;

use crate::session::{AuthState, Session, SessionInfo, SessionTiming, TokenPair};
use refresh::RefreshHandle;

/// Mutable state shared by every clone of an [`AuthManager`].
#[derive(Default)]
pub(crate) struct SessionState {
    session: Option<Session>,
    refresh: Option<RefreshHandle>,
    generation: u64,
}

impl SessionState {
    /// Replace the session wholesale and detach any pending refresh.
    fn replace(&mut self, session: Option<Session>) {
        self.session = session;
        self.refresh = None;
        self.generation = self.generation.wrapping_add(1);
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("session", &self.session)
            .field("refreshing", &self.refresh.is_some())
            .field("generation", &self.generation)
            .finish()
    }
}

/// Lock the shared state, recovering the data if a previous holder panicked.
pub(crate) fn lock_state(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Client-side identity component: authenticates, holds one session and
/// renews it transparently.
///
/// Cloning is cheap and every clone shares the same session.
///
/// ```rust,ignore
/// use transit_auth::{AuthManager, CredentialInput};
///
/// let manager = AuthManager::builder()
///     .base_url("https://id.example-transit.com".to_string())
///     .build()?;
///
/// manager.login(CredentialInput::password("rider@example.com", "hunter2")).await?;
/// let bearer = manager.get_access_token().await?;
/// ```
#[derive(Debug, Clone)]
pub struct AuthManager {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) endpoints: EndpointPaths,
    pub(crate) timing: SessionTiming,
    pub(crate) state: Arc<Mutex<SessionState>>,
}

impl AuthManager {
    /// Create a new manager builder.
    pub fn builder() -> builder::AuthManagerBuilder {
        builder::AuthManagerBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Adopt `tokens` as the session.
    ///
    /// Expiry is `expires_at_override` when given, otherwise the access token's
    /// `exp` claim, otherwise now plus the default token lifetime. Returns the
    /// resulting expiry instant.
    pub fn store(
        &self,
        tokens: TokenPair,
        expires_at_override: Option<DateTime<Utc>>,
    ) -> DateTime<Utc> {
        let session = Session::derive(
            tokens,
            expires_at_override,
            self.timing.default_lifetime,
            Utc::now(),
        );
        self.install(session).expires_at()
    }

    /// Install `session`, replacing whatever was there.
    pub(crate) fn install(&self, session: Session) -> Session {
        lock_state(&self.state).replace(Some(session.clone()));
        info!(expires_at = %session.expires_at(), "Session established");
        session
    }

    /// Whether a session exists and is valid once the expiry buffer is applied.
    ///
    /// Never performs I/O.
    pub fn is_authenticated(&self) -> bool {
        let state = lock_state(&self.state);
        state
            .session
            .as_ref()
            .is_some_and(|s| s.is_valid_at(Utc::now(), self.timing.expiry_buffer))
    }

    /// Current position in the session lifecycle.
    pub fn state(&self) -> AuthState {
        let state = lock_state(&self.state);
        match (&state.session, &state.refresh) {
            (_, Some(_)) => AuthState::Refreshing,
            (Some(_), None) => AuthState::Authenticated,
            (None, None) => AuthState::Anonymous,
        }
    }

    /// Redacted view of the current session, if any.
    pub fn session_snapshot(&self) -> Option<SessionInfo> {
        let state = lock_state(&self.state);
        let now = Utc::now();
        state.session.as_ref().map(|s| SessionInfo {
            expires_at: s.expires_at(),
            expires_in: s.remaining_at(now),
            valid: s.is_valid_at(now, self.timing.expiry_buffer),
        })
    }

    /// Mark the current session as expired, keeping its refresh token so the
    /// next `get_access_token()` refreshes it.
    pub(crate) fn expire_session(&self) {
        let mut state = lock_state(&self.state);
        if state.refresh.is_none() {
            let expired = state.session.take().map(Session::expired);
            state.session = expired;
        }
    }
}
