//! Single-flight session refresh.
//!
//! At most one refresh call is in flight per manager. The first caller that
//! finds the session stale starts it and stores a shared handle; every other
//! caller awaits that same handle and observes the same outcome. A refresh
//! whose generation no longer matches the state (a login, store or logout
//! happened meanwhile) is discarded instead of installed.

use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use secrecy::SecretString;
use tracing::{debug, warn};

use super::{AuthManager, lock_state};
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::session::{Session, TokenPair};

pub(crate) type RefreshOutcome = std::result::Result<Session, Arc<ClientError>>;
pub(crate) type RefreshHandle = Shared<BoxFuture<'static, RefreshOutcome>>;

impl AuthManager {
    /// Return a usable access token, refreshing the session first if it is stale.
    ///
    /// Concurrent callers share one refresh call. Fails with
    /// [`ClientError::SessionExpired`] when there is no session to refresh and
    /// with [`ClientError::RefreshFailed`] when the shared refresh fails; in the
    /// latter case the session is cleared.
    pub async fn get_access_token(&self) -> Result<SecretString> {
        let pending = {
            let mut state = lock_state(&self.state);
            let now = Utc::now();

            if let Some(session) = &state.session
                && session.is_valid_at(now, self.timing.expiry_buffer)
            {
                return Ok(SecretString::from(session.access_token().to_string()));
            }

            if let Some(pending) = &state.refresh {
                debug!("Joining in-flight session refresh");
                pending.clone()
            } else {
                let refresh_token = state
                    .session
                    .as_ref()
                    .map(|s| s.tokens().refresh_token().clone())
                    .ok_or(ClientError::SessionExpired)?;
                let handle = self.start_refresh(refresh_token, state.generation);
                state.refresh = Some(handle.clone());
                handle
            }
        };

        pending.await.map_err(ClientError::RefreshFailed)?;

        // Re-read: the refreshed session may already sit inside the buffer, or
        // a logout may have replaced it while we waited.
        self.valid_access_token().ok_or(ClientError::SessionExpired)
    }

    /// Build the shared refresh future for the session at `generation`.
    fn start_refresh(&self, refresh_token: SecretString, generation: u64) -> RefreshHandle {
        debug!(generation, "Starting session refresh");
        let manager = self.clone();

        async move {
            let result = endpoints::refresh(
                &manager.http,
                &manager.base_url,
                &manager.endpoints.refresh,
                &refresh_token,
            )
            .await;
            manager.settle_refresh(generation, result)
        }
        .boxed()
        .shared()
    }

    /// Apply a refresh result to the state if it is still current.
    fn settle_refresh(
        &self,
        generation: u64,
        result: Result<TokenPair>,
    ) -> RefreshOutcome {
        let now = Utc::now();
        let outcome = result
            .map(|tokens| Session::derive(tokens, None, self.timing.default_lifetime, now))
            .map_err(Arc::new);

        let mut state = lock_state(&self.state);
        if state.generation != generation {
            warn!(
                generation,
                current = state.generation,
                "Discarding refresh result for a replaced session"
            );
            return outcome;
        }

        match &outcome {
            Ok(session) => {
                state.replace(Some(session.clone()));
                debug!(expires_at = %session.expires_at(), "Session refreshed");
            }
            Err(e) => {
                state.replace(None);
                warn!(error = %e, "Session refresh failed, session cleared");
            }
        }
        outcome
    }

    /// Current access token without any refresh attempt, if the session is valid.
    pub(crate) fn valid_access_token(&self) -> Option<SecretString> {
        let state = lock_state(&self.state);
        state
            .session
            .as_ref()
            .filter(|s| s.is_valid_at(Utc::now(), self.timing.expiry_buffer))
            .map(|s| SecretString::from(s.access_token().to_string()))
    }
}
