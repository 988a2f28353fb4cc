//! CourtPass CLI - Command-line front end for the CourtPass client core
//!
//! Sign in with a federated identity, inspect the stored session and browse
//! the gift catalog from the terminal.

mod authorizer;
mod cli;
mod commands;
mod config;
mod error;
mod secret_store;


use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::run_auth;
use crate::commands::gifts::run_gifts;
use crate::error::CliError;

const DEFAULT_LOG_DIRECTIVE: &str = "courtpass=info";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let directive: tracing_subscriber::filter::Directive = DEFAULT_LOG_DIRECTIVE
        .parse()
        .map_err(|error| CliError::Config(format!("invalid log directive: {error}")))?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .init();

    let cli = Cli::parse();
    let options = cli.global_options();

    match cli.command {
        Commands::Auth { command } => run_auth(command, &options).await?,
        Commands::Gifts { command } => run_gifts(command, &options).await?,
    }

    Ok(())
}
