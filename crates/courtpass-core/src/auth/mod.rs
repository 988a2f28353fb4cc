//! Identity-provider adapters.
//!
//! An `IdentityProvider` turns a user gesture ("Sign in with Apple/Google")
//! into an identity token for the backend's federated login. The native
//! platform flow is an external collaborator behind `NativeAuthorizer`;
//! `FederatedIdentityProvider` prepares its request and normalizes what it
//! returns.

mod mock;
mod nonce;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::{Error, Result};

pub use mock::{MockIdentityOutcome, MockIdentityProvider};
pub use nonce::{random_nonce, sha256_hex, Nonce};

/// Supported third-party identity providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Apple,
    Google,
}

impl AuthProvider {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Google => "google",
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthProvider {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "apple" => Ok(Self::Apple),
            "google" => Ok(Self::Google),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown identity provider '{other}'"
            ))),
        }
    }
}

/// Produces an identity token for a provider. Concurrent calls are not
/// deduplicated; callers disable the triggering control while one is pending.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, provider: AuthProvider) -> Result<String>;
}

/// Scopes requested from Sign in with Apple.
pub const APPLE_SCOPES: [&str; 2] = ["fullName", "email"];

/// What the native flow is asked to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationRequest {
    Apple {
        nonce: Nonce,
        scopes: Vec<&'static str>,
    },
    Google {
        client_id: String,
    },
}

/// What the native flow reported back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    Token(Option<String>),
    Cancelled,
    Failed(String),
}

/// Platform sign-in UI (system sheet, browser hand-off, pasted assertion...).
#[async_trait]
pub trait NativeAuthorizer: Send + Sync {
    async fn authorize(&self, request: &AuthorizationRequest) -> AuthorizationOutcome;
}

/// Adapter over a native authorizer that builds provider requests from config.
pub struct FederatedIdentityProvider<A: NativeAuthorizer> {
    authorizer: A,
    nonce_length: usize,
    google_client_id: Option<String>,
}

impl<A: NativeAuthorizer> FederatedIdentityProvider<A> {
    pub fn new(authorizer: A, config: &ClientConfig) -> Self {
        Self {
            authorizer,
            nonce_length: config.nonce_length,
            google_client_id: config.google_client_id.clone(),
        }
    }

    fn build_request(&self, provider: AuthProvider) -> Result<AuthorizationRequest> {
        match provider {
            AuthProvider::Apple => Ok(AuthorizationRequest::Apple {
                nonce: Nonce::generate(self.nonce_length)?,
                scopes: APPLE_SCOPES.to_vec(),
            }),
            AuthProvider::Google => {
                let client_id = self.google_client_id.clone().ok_or_else(|| {
                    Error::InvalidConfiguration("Google client ID is not configured".to_string())
                })?;
                Ok(AuthorizationRequest::Google { client_id })
            }
        }
    }
}

#[async_trait]
impl<A: NativeAuthorizer> IdentityProvider for FederatedIdentityProvider<A> {
    async fn sign_in(&self, provider: AuthProvider) -> Result<String> {
        let request = self.build_request(provider)?;
        tracing::info!("Starting {} sign-in", provider);

        match self.authorizer.authorize(&request).await {
            AuthorizationOutcome::Token(token) => {
                let token = token
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
                    .ok_or(Error::AuthTokenMissing)?;
                tracing::info!("{} sign-in produced an identity token", provider);
                Ok(token)
            }
            AuthorizationOutcome::Cancelled => {
                tracing::info!("{} sign-in cancelled by user", provider);
                Err(Error::AuthCancelled)
            }
            AuthorizationOutcome::Failed(message) => {
                tracing::warn!("{} sign-in failed: {}", provider, message);
                Err(Error::AuthProvider(message))
            }
        }
    }
}
