//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).

use transit_auth::ClientError;

/// Structured exit codes for transit-auth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Authentication failure - rejected credentials or an unrecoverable session.
    ///
    /// Scripts should obtain fresh credentials.
    AuthenticationFailed = 2,

    /// Connection error - network, timeout, or DNS failure.
    ///
    /// Scripts may retry with backoff.
    ConnectionError = 3,

    /// Validation error - input rejected before any request was sent, or by the service.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::LoginFailed { .. }
            | ClientError::NoEligibleStrategy { .. }
            | ClientError::SessionExpired => ExitCode::AuthenticationFailed,
            ClientError::ApiError {
                status: 401 | 403, ..
            } => ExitCode::AuthenticationFailed,
            ClientError::RefreshFailed(inner) => match Self::from(inner.as_ref()) {
                ExitCode::ConnectionError => ExitCode::ConnectionError,
                _ => ExitCode::AuthenticationFailed,
            },

            ClientError::HttpError(e) if e.is_connect() || e.is_timeout() => {
                ExitCode::ConnectionError
            }
            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,

            ClientError::Validation(_) | ClientError::RegistrationFailed { .. } => {
                ExitCode::ValidationError
            }
            ClientError::ApiError { status: 400, .. } => ExitCode::ValidationError,

            ClientError::HttpError(_)
            | ClientError::ApiError { .. }
            | ClientError::ShapeMismatch { .. }
            | ClientError::InvalidConfig(_) => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no ClientError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ClientError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}
