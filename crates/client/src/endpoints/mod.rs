//! REST endpoint implementations for the identity and account services.
//!
//! Each function performs exactly one HTTP call. None of them retries: the
//! manager decides what a failure means.

mod account;
mod auth;
mod request;

pub(crate) use account::{get_balance, get_profile, register};
pub(crate) use auth::{login, logout, refresh};
