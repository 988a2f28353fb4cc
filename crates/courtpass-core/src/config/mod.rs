//! Client configuration.
//!
//! Provides `ClientConfig`, the single struct the CLI and any other front end
//! use to discover the RPC endpoint, identity-provider settings and the
//! secure-storage namespace.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

pub const DEFAULT_RPC_ENDPOINT: &str = "https://api.court360.ai/rpc/client";
pub const DEFAULT_KEYRING_SERVICE: &str = "ai.court360.client";
pub const DEFAULT_NONCE_LENGTH: usize = 32;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub const ENV_RPC_ENDPOINT: &str = "COURTPASS_RPC_ENDPOINT";
pub const ENV_GOOGLE_CLIENT_ID: &str = "COURTPASS_GOOGLE_CLIENT_ID";

/// Build-provisioned client configuration.
///
/// Values here are public endpoints and identifiers. Secrets never belong in
/// this struct; session material lives in the secure token store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct ClientConfig {
    pub rpc_endpoint: String,
    pub google_client_id: Option<String>,
    pub keyring_service: String,
    pub nonce_length: usize,
    pub search_debounce_ms: u64,
    pub http_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_endpoint: DEFAULT_RPC_ENDPOINT.to_string(),
            google_client_id: None,
            keyring_service: DEFAULT_KEYRING_SERVICE.to_string(),
            nonce_length: DEFAULT_NONCE_LENGTH,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Parse a JSON config payload and validate it.
    pub fn parse(payload: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(payload)
            .map_err(|error| Error::InvalidConfiguration(format!("invalid config JSON: {error}")))?;
        config.normalized()
    }

    /// Load a config file, returning defaults when the file does not exist.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default().normalized();
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            Error::InvalidConfiguration(format!(
                "failed to read config at {}: {error}",
                path.display()
            ))
        })?;
        Self::parse(&raw)
    }

    /// Apply overrides from a variable lookup (normally `std::env::var`).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = normalize_text_option(lookup(ENV_RPC_ENDPOINT)) {
            self.rpc_endpoint = endpoint;
        }
        if let Some(client_id) = normalize_text_option(lookup(ENV_GOOGLE_CLIENT_ID)) {
            self.google_client_id = Some(client_id);
        }
        self.normalized()
    }

    /// Google sign-in needs a client ID; its absence is a configuration error.
    pub fn require_google_client_id(&self) -> Result<&str> {
        self.google_client_id.as_deref().ok_or_else(|| {
            Error::InvalidConfiguration("Google client ID is not configured".to_string())
        })
    }

    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    fn normalized(mut self) -> Result<Self> {
        let endpoint = normalize_text_option(Some(self.rpc_endpoint)).ok_or_else(|| {
            Error::InvalidConfiguration("rpc_endpoint must not be empty".to_string())
        })?;
        if !is_http_url(&endpoint) {
            return Err(Error::InvalidConfiguration(
                "rpc_endpoint must include http:// or https://".to_string(),
            ));
        }
        self.rpc_endpoint = endpoint;
        self.google_client_id = normalize_text_option(self.google_client_id);
        self.keyring_service = normalize_text_option(Some(self.keyring_service))
            .ok_or_else(|| {
                Error::InvalidConfiguration("keyring_service must not be empty".to_string())
            })?;
        if self.nonce_length == 0 {
            return Err(Error::InvalidConfiguration(
                "nonce_length must be greater than zero".to_string(),
            ));
        }
        if self.http_timeout_secs == 0 {
            return Err(Error::InvalidConfiguration(
                "http_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}
