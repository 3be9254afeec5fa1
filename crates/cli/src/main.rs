//! transit-auth - Command-line client for the transit account identity service.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build configuration and an `AuthManager`, then run one command.
//! - Map failures to structured exit codes.
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Command output goes to stdout; logs and errors go to stderr.

mod args;
mod commands;
mod error;

use std::time::Duration;

use anyhow::Context;
use args::Cli;
use clap::Parser;
use error::{ExitCode, ExitCodeExt};
use transit_auth::AuthManager;
use transit_config::{Config, ConfigLoader};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn build_config(cli: &Cli, loader: ConfigLoader) -> anyhow::Result<Config> {
    let mut loader = loader
        .from_env()
        .context("Failed to load configuration from environment")?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }
    if let Some(ref tenant) = cli.tenant_id {
        loader = loader.with_tenant_id(tenant.clone());
    }

    loader.build().context("Failed to build configuration")
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    let loader = match ConfigLoader::new().load_dotenv() {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Failed to load environment: {}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    let cli = Cli::parse();
    init_logging(cli.log_json);

    let config = match build_config(&cli, loader) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(ExitCode::ValidationError.as_i32());
        }
    };

    let manager = match AuthManager::builder().from_config(&config).build() {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("Error: failed to create client: {}", e);
            std::process::exit(ExitCode::from(&e).as_i32());
        }
    };

    if let Err(e) = commands::run(&manager, cli.command).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(e.exit_code().as_i32());
    }

    std::process::exit(ExitCode::Success.as_i32());
}
