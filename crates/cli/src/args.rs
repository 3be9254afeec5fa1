//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).

use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;
use transit_auth::CredentialInput;

#[derive(Parser)]
#[command(name = "transit-auth")]
#[command(about = "Authenticate against the transit account identity service", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  transit-auth -b https://id.example-transit.com login -u rider@example.com\n  transit-auth token --refresh-token $TRANSIT_REFRESH_TOKEN\n  transit-auth balance\n  transit-auth register rider@example.com --password pw --confirm-password pw\n"
)]
pub struct Cli {
    /// Base URL of the identity service (e.g., https://id.example-transit.com)
    #[arg(short, long, global = true, env = "TRANSIT_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "TRANSIT_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (for development servers)
    #[arg(long, global = true, env = "TRANSIT_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Tenant identifier sent in the X-Tenant-Id header
    #[arg(long, global = true, env = "TRANSIT_TENANT_ID")]
    pub tenant_id: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and print the resulting token pair
    Login {
        #[command(flatten)]
        credentials: CredentialArgs,

        /// Revoke every other token issued to this account
        #[arg(long)]
        revoke_other_tokens: bool,

        /// Push-notification token to associate with the session
        #[arg(long)]
        fcm_token: Option<String>,
    },

    /// Log in and print a valid access token
    Token {
        #[command(flatten)]
        credentials: CredentialArgs,
    },

    /// Log in and print the account profile
    Profile {
        #[command(flatten)]
        credentials: CredentialArgs,
    },

    /// Log in and print the stored-value balance
    Balance {
        #[command(flatten)]
        credentials: CredentialArgs,
    },

    /// Log in, then revoke the session's refresh token
    Logout {
        #[command(flatten)]
        credentials: CredentialArgs,
    },

    /// Create a new account
    Register {
        /// Email address of the new account
        email: String,

        /// Password for the new account
        #[arg(long, env = "TRANSIT_PASSWORD")]
        password: String,

        /// Password confirmation; must match --password
        #[arg(long)]
        confirm_password: String,
    },
}

/// Credentials accepted by every command that needs a session.
#[derive(Args, Clone, Debug, Default)]
pub struct CredentialArgs {
    /// Username for password login
    #[arg(short, long, env = "TRANSIT_USERNAME")]
    pub username: Option<String>,

    /// Password for password login
    #[arg(short, long, env = "TRANSIT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Refresh token to exchange for a new session
    #[arg(long, env = "TRANSIT_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// Access token to reuse while it is still fresh (requires --refresh-token)
    #[arg(long, env = "TRANSIT_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,
}

impl CredentialArgs {
    /// Convert into the client's credential input. Shape checks happen in the client.
    pub fn into_input(self) -> CredentialInput {
        CredentialInput {
            username: self.username,
            password: self.password.map(SecretString::from),
            refresh_token: self.refresh_token.map(SecretString::from),
            access_token: self.access_token.map(SecretString::from),
            ..CredentialInput::default()
        }
    }
}
