//! Session manager backed by the secure token store.

use crate::error::Result;
use crate::models::{Session, User};
use crate::store::TokenVault;

/// Screen the app should open on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Auth,
    Home,
}

/// Owns the current session. Reads go through the vault queue; updates and
/// resets are enqueued and return immediately.
#[derive(Debug, Clone)]
pub struct SessionManager {
    vault: TokenVault,
}

impl SessionManager {
    pub const fn new(vault: TokenVault) -> Self {
        Self { vault }
    }

    /// Token and user as of every update/reset issued before this call.
    pub async fn current(&self) -> Result<Session> {
        self.vault.get().await
    }

    pub async fn access_token(&self) -> Result<Option<String>> {
        Ok(self.current().await?.access_token)
    }

    pub async fn user(&self) -> Result<Option<User>> {
        Ok(self.current().await?.user)
    }

    pub async fn is_signed_in(&self) -> Result<bool> {
        Ok(self.current().await?.is_signed_in())
    }

    /// Replace the stored session. Persistence completes in the background.
    pub fn update(&self, access_token: impl Into<String>, user: User) -> Result<()> {
        tracing::info!("Session updated for user {}", user.id);
        self.vault.set(Some(access_token.into()), Some(user))
    }

    /// Forget the stored session.
    pub fn reset(&self) -> Result<()> {
        tracing::info!("Session reset");
        self.vault.clear()
    }

    /// Wait for queued updates to reach secure storage.
    pub async fn flush(&self) -> Result<()> {
        self.vault.flush().await
    }

    /// Best-effort start route: a stored token opens Home, anything else Auth.
    pub async fn resolve_start_route(&self) -> AppRoute {
        match self.current().await {
            Ok(session) if session.is_signed_in() => AppRoute::Home,
            Ok(_) => AppRoute::Auth,
            Err(error) => {
                tracing::warn!("Failed to read stored session: {}", error);
                AppRoute::Auth
            }
        }
    }
}
