//! Error types for courtpass-core

use thiserror::Error;

/// Result type alias using courtpass-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Fallback text shown when a failure carries no description of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Unexpected error";

/// Errors that can occur in courtpass-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Network-layer failure (timeout, DNS, TLS, connection reset)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("HTTP {0}")]
    HttpStatus(u16),

    /// Backend rejected the call at the JSON-RPC level
    #[error("{message}")]
    Rpc { code: i64, message: String },

    /// Response envelope carried neither a result nor an error, or was malformed
    #[error("Decoding failed")]
    DecodingFailed,

    /// User aborted the native identity flow
    #[error("Cancelled")]
    AuthCancelled,

    /// Identity provider reported a failure
    #[error("{0}")]
    AuthProvider(String),

    /// Identity provider succeeded without yielding a usable token
    #[error("ID token missing")]
    AuthTokenMissing,

    /// Required client configuration is missing or malformed
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Secure storage failure
    #[error("Secure storage error: {0}")]
    Store(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Text suitable for showing to the user.
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Transport(error) => error.to_string(),
            other => other.to_string(),
        };
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }

    /// Whether the failure came from the user backing out of a flow.
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::AuthCancelled)
    }
}
