//! Configuration type definitions.
//!
//! Responsibilities:
//! - Define connection, session timing, identification header and endpoint path settings.
//! - Provide serialization helpers for durations.
//!
//! Does NOT handle:
//! - Configuration loading from the environment (see `loader` module).
//! - Actual network connections or authentication flows (see client crate).
//!
//! Invariants:
//! - Default values come from `crate::constants`, never from inline literals.
//! - Identification headers are configuration only; the client attaches them verbatim.

pub(crate) mod connection;
mod identity;

pub use connection::{Config, ConnectionConfig, SessionConfig};
pub use identity::{ClientIdentity, EndpointPaths};
