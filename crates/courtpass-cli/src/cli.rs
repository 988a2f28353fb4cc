use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use courtpass_core::auth::AuthProvider;

#[derive(Parser)]
#[command(name = "courtpass")]
#[command(about = "Sign in to CourtPass and browse gifts from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use the mock identity provider, mock API and an in-memory token store
    #[arg(long, global = true)]
    pub mock: bool,

    /// Optional path to a client config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub mock: bool,
    pub config_path: Option<PathBuf>,
}

impl Cli {
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            mock: self.mock,
            config_path: self.config.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in, inspect or clear the stored session
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Browse the gift catalog
    Gifts {
        #[command(subcommand)]
        command: GiftCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ProviderArg {
    Apple,
    Google,
}

impl From<ProviderArg> for AuthProvider {
    fn from(value: ProviderArg) -> Self {
        match value {
            ProviderArg::Apple => Self::Apple,
            ProviderArg::Google => Self::Google,
        }
    }
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in with Apple or Google and store the session in the keychain
    Login {
        /// Identity provider
        #[arg(long, value_enum)]
        provider: ProviderArg,
        /// Provider identity token (falls back to COURTPASS_ID_TOKEN, then a prompt)
        #[arg(long, value_name = "TOKEN")]
        id_token: Option<String>,
    },
    /// Show the stored session
    Status,
    /// Clear the stored session
    Logout,
}

#[derive(Subcommand)]
pub enum GiftCommands {
    /// List gifts matching a search and filters
    List {
        /// Free-text search (may auto-select a filter)
        #[arg(short, long)]
        search: Option<String>,
        /// Filter name, repeatable
        #[arg(short, long = "filter", value_name = "NAME")]
        filters: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show filter chips with their current labels
    Filters {
        /// Free-text search (may auto-select a filter)
        #[arg(short, long)]
        search: Option<String>,
        /// Filter name, repeatable
        #[arg(short, long = "filter", value_name = "NAME")]
        filters: Vec<String>,
    },
    /// Interactive browsing session on stdin
    Browse,
}
