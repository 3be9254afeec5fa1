//! Logout, registration and bearer-authenticated account reads.

use secrecy::ExposeSecret;
use tracing::{debug, info, warn};

use super::{AuthManager, lock_state};
use crate::credentials::RegistrationRequest;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::{AccountProfile, StoredValueBalance};

/// Run a bearer-authenticated call, retrying once with a refreshed token on 401.
///
/// ```ignore
/// with_bearer!(self, __token, endpoints::get_profile(&self.http, &self.base_url, path, __token).await)
/// ```
macro_rules! with_bearer {
    ($self:expr, $token:ident, $call:expr) => {{
        let bearer = $self.get_access_token().await?;
        let $token = bearer.expose_secret();
        match $call {
            Err(ClientError::ApiError { status: 401, .. }) => {
                debug!("Access token rejected (status 401), refreshing and retrying once");
                $self.expire_session();
                let bearer = $self.get_access_token().await?;
                let $token = bearer.expose_secret();
                $call
            }
            result => result,
        }
    }};
}

impl AuthManager {
    /// End the session.
    ///
    /// Local state is cleared first, so the manager is anonymous even when the
    /// remote logout call fails. Remote failures are logged and swallowed.
    pub async fn logout(&self) {
        let session = {
            let mut state = lock_state(&self.state);
            let session = state.session.take();
            state.replace(None);
            session
        };

        let Some(session) = session else {
            debug!("Logout without a session, nothing to revoke");
            return;
        };
        info!("Session cleared");

        if let Err(e) = endpoints::logout(
            &self.http,
            &self.base_url,
            &self.endpoints.logout,
            session.tokens().refresh_token(),
        )
        .await
        {
            warn!(error = %e, "Remote logout failed; local session already cleared");
        }
    }

    /// Create a new account. Does not log in.
    ///
    /// Mismatched passwords and missing fields fail with
    /// [`ClientError::Validation`] without a network call. A rejection by the
    /// service becomes [`ClientError::RegistrationFailed`] with the server's message.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<()> {
        request.validate()?;

        endpoints::register(&self.http, &self.base_url, &self.endpoints.register, request)
            .await
            .map_err(|e| match e {
                ClientError::ApiError {
                    status, message, ..
                } => ClientError::RegistrationFailed { status, message },
                other => other,
            })?;

        info!(email = %request.email, "Account registered");
        Ok(())
    }

    /// Fetch the authenticated rider's profile.
    pub async fn profile(&self) -> Result<AccountProfile> {
        let path = &self.endpoints.profile;
        with_bearer!(
            self,
            __token,
            endpoints::get_profile(&self.http, &self.base_url, path, __token).await
        )
    }

    /// Fetch the authenticated rider's stored-value balance.
    pub async fn balance(&self) -> Result<StoredValueBalance> {
        let path = &self.endpoints.balance;
        with_bearer!(
            self,
            __token,
            endpoints::get_balance(&self.http, &self.base_url, path, __token).await
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TokenPair;

    #[tokio::test]
    async fn test_register_mismatch_is_local() {
        let manager = AuthManager::builder()
            .base_url("http://127.0.0.1:9".to_string())
            .build()
            .unwrap();
        let request = RegistrationRequest::new("rider@example.com", "a", "b");
        let result = manager.register(&request).await;
        assert!(matches!(result, Err(ClientError::Validation(_))));
    }

    #[tokio::test]
    async fn test_logout_clears_session_when_remote_unreachable() {
        let manager = AuthManager::builder()
            .base_url("http://127.0.0.1:9".to_string())
            .build()
            .unwrap();
        manager.store(TokenPair::new("access", "refresh"), None);

        manager.logout().await;

        assert!(!manager.is_authenticated());
        assert!(manager.session_snapshot().is_none());
    }

    #[tokio::test]
    async fn test_profile_without_session_is_session_expired() {
        let manager = AuthManager::builder()
            .base_url("http://127.0.0.1:9".to_string())
            .build()
            .unwrap();
        let result = manager.profile().await;
        assert!(matches!(result, Err(ClientError::SessionExpired)));
    }
}
