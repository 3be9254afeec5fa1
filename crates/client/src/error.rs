//! Error types for the transit auth client.

use std::sync::Arc;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while authenticating or calling the identity service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Input failed local validation; no request was sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-200 response from the identity service.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// Response body did not have the expected shape.
    #[error("Unexpected response shape from {endpoint}: {message}")]
    ShapeMismatch {
        endpoint: &'static str,
        message: String,
    },

    /// Password login was rejected.
    #[error("Login failed ({status}): {message}")]
    LoginFailed { status: u16, message: String },

    /// Every eligible login strategy failed and password login was not eligible.
    #[error("Login failed: no further login strategy was eligible for the supplied credentials")]
    NoEligibleStrategy {
        #[source]
        last_error: Option<Box<ClientError>>,
    },

    /// The shared refresh call failed; every waiter receives the same error.
    #[error("Token refresh failed: {0}")]
    RefreshFailed(#[source] Arc<ClientError>),

    /// No valid session exists, even after an attempted refresh.
    #[error("Session expired, please re-authenticate")]
    SessionExpired,

    /// Account registration was rejected.
    #[error("Registration failed ({status}): {message}")]
    RegistrationFailed { status: u16, message: String },

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid client configuration (header values, durations).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Check if this error means the caller must authenticate again.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::LoginFailed { .. } | Self::NoEligibleStrategy { .. } | Self::SessionExpired => {
                true
            }
            Self::RefreshFailed(inner) => {
                inner.is_auth_error() || matches!(inner.status(), Some(401 | 403))
            }
            Self::ApiError { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. }
            | Self::LoginFailed { status, .. }
            | Self::RegistrationFailed { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            Self::RefreshFailed(inner) => inner.status(),
            _ => None,
        }
    }

    /// Check if this error happened before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
