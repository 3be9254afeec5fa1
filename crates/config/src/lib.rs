//! Configuration management for the transit account auth client.
//!
//! This crate provides the connection, session-timing, identification-header
//! and endpoint-path settings consumed by `transit-auth`, plus a loader that
//! merges builder values, environment variables and an optional `.env` file.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{ClientIdentity, Config, ConnectionConfig, EndpointPaths, SessionConfig};
