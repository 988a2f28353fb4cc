//! Resolve the client config for this invocation.

use std::env;
use std::path::{Path, PathBuf};

use courtpass_core::config::ClientConfig;

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "config.json";

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("courtpass").join(CONFIG_FILE_NAME))
}

/// Defaults, then the config file, then environment overrides.
///
/// An explicit `--config` path must exist; the default location may be absent.
pub fn load_client_config(explicit_path: Option<&Path>) -> Result<ClientConfig, CliError> {
    load_client_config_with(explicit_path, default_config_path(), |name| {
        env::var(name).ok()
    })
}

pub fn load_client_config_with<F>(
    explicit_path: Option<&Path>,
    default_path: Option<PathBuf>,
    lookup: F,
) -> Result<ClientConfig, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = if let Some(path) = explicit_path {
        if !path.exists() {
            return Err(CliError::Config(format!(
                "config file not found at {}",
                path.display()
            )));
        }
        ClientConfig::load_from_path(path)?
    } else if let Some(path) = default_path {
        ClientConfig::load_from_path(&path)?
    } else {
        tracing::debug!("No config directory available, using defaults");
        ClientConfig::default()
    };

    Ok(config.with_overrides(lookup)?)
}
