use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] courtpass_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Unknown filter '{0}'. Run `courtpass gifts filters` to list filter names.")]
    UnknownFilter(String),
    #[error("No gift at position {0}")]
    GiftNotFound(usize),
}
