//! Sign-in orchestration: identity provider -> federated login -> session.

use std::sync::Arc;

use crate::api::CourtApi;
use crate::auth::{AuthProvider, IdentityProvider};
use crate::error::Result;
use crate::models::User;
use crate::session::SessionManager;

/// Thread-safe sign-in service shared by the auth screen.
#[derive(Clone)]
pub struct SignInService {
    identity: Arc<dyn IdentityProvider>,
    api: Arc<dyn CourtApi>,
    session: SessionManager,
}

impl SignInService {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        api: Arc<dyn CourtApi>,
        session: SessionManager,
    ) -> Self {
        Self {
            identity,
            api,
            session,
        }
    }

    /// Run the full flow. On any failure the stored session is left as it was.
    pub async fn sign_in(&self, provider: AuthProvider) -> Result<User> {
        let outcome = self.try_sign_in(provider).await;
        if let Err(error) = &outcome {
            tracing::warn!("{} sign-in failed: {}", provider, error);
        }
        outcome
    }

    async fn try_sign_in(&self, provider: AuthProvider) -> Result<User> {
        let id_token = self.identity.sign_in(provider).await?;
        let result = self.api.firebase_login(&id_token).await?;
        self.session.update(result.access_token, result.me.clone())?;
        tracing::info!("Signed in as {} via {}", result.me.email, provider);
        Ok(result.me)
    }

    pub fn sign_out(&self) -> Result<()> {
        self.session.reset()
    }

    pub const fn session(&self) -> &SessionManager {
        &self.session
    }
}
