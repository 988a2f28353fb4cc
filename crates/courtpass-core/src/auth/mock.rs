//! Scripted identity provider for demos and tests.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::{AuthProvider, IdentityProvider};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockIdentityOutcome {
    Token,
    Cancelled,
    Failed(String),
    TokenMissing,
}

#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    outcome: MockIdentityOutcome,
    delay: Duration,
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new(MockIdentityOutcome::Token)
    }
}

impl MockIdentityProvider {
    pub const fn new(outcome: MockIdentityOutcome) -> Self {
        Self {
            outcome,
            delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_in(&self, provider: AuthProvider) -> Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.outcome {
            MockIdentityOutcome::Token => {
                let id = Uuid::now_v7().simple().to_string();
                let suffix = &id[id.len() - 8..];
                Ok(format!("mock_{provider}_id_token_{suffix}"))
            }
            MockIdentityOutcome::Cancelled => Err(Error::AuthCancelled),
            MockIdentityOutcome::Failed(message) => Err(Error::AuthProvider(message.clone())),
            MockIdentityOutcome::TokenMissing => Err(Error::AuthTokenMissing),
        }
    }
}
