//! Transit account authentication client.
//!
//! This crate authenticates a rider against the identity service, holds a
//! single access/refresh token session, and hands out valid access tokens,
//! renewing the session transparently with one shared refresh call no matter
//! how many tasks ask at once.

mod claims;
mod credentials;
mod endpoints;
pub mod error;
mod manager;
mod models;
mod session;

pub use credentials::{CredentialInput, RegistrationRequest};
pub use error::{ClientError, Result};
pub use manager::AuthManager;
pub use manager::builder::AuthManagerBuilder;
pub use models::{AccountProfile, LoginOutcome, StoredValueBalance};
pub use session::{AuthState, SessionInfo, TokenPair};
