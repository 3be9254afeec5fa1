//! Shared test utilities for transit-auth CLI integration tests.
//!
//! Invariants / Assumptions:
//! - Every command built here ignores local `.env` files and host credentials.

use assert_cmd::Command;

/// Returns a hermetic `transit-auth` command for integration testing.
pub fn transit_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("transit-auth");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env_remove("TRANSIT_BASE_URL")
        .env_remove("TRANSIT_USERNAME")
        .env_remove("TRANSIT_PASSWORD")
        .env_remove("TRANSIT_ACCESS_TOKEN")
        .env_remove("TRANSIT_REFRESH_TOKEN")
        .env_remove("TRANSIT_TENANT_ID");

    cmd
}

/// Returns a hermetic `transit-auth` command pointed at `base_url`.
#[allow(dead_code)]
pub fn transit_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = transit_cmd();
    cmd.env("TRANSIT_BASE_URL", base_url);
    cmd
}
