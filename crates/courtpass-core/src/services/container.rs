//! Explicit dependency wiring for a client front end.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::api::{CourtApi, CourtApiClient, MockCourtApi};
use crate::auth::{IdentityProvider, MockIdentityProvider};
use crate::catalog::GiftBrowser;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::search::SearchDebouncer;
use crate::session::SessionManager;
use crate::store::{MemorySecretBackend, SecretBackend, TokenVault};

use super::SignInService;

const MOCK_IDENTITY_DELAY: Duration = Duration::from_millis(1200);
const MOCK_API_DELAY: Duration = Duration::from_millis(500);

/// Owns the long-lived collaborators and hands them down the call graph.
#[derive(Clone)]
pub struct AppContainer {
    config: ClientConfig,
    identity: Arc<dyn IdentityProvider>,
    api: Arc<dyn CourtApi>,
    session: SessionManager,
}

impl AppContainer {
    pub fn new(
        config: ClientConfig,
        identity: Arc<dyn IdentityProvider>,
        api: Arc<dyn CourtApi>,
        session: SessionManager,
    ) -> Self {
        Self {
            config,
            identity,
            api,
            session,
        }
    }

    /// Real HTTP client over the given secret backend.
    pub fn bootstrap<B: SecretBackend>(
        config: ClientConfig,
        identity: Arc<dyn IdentityProvider>,
        backend: B,
    ) -> Result<Self> {
        let api = Arc::new(CourtApiClient::new(&config)?);
        let session = SessionManager::new(TokenVault::spawn(backend)?);
        Ok(Self::new(config, identity, api, session))
    }

    /// Offline wiring: mock provider, mock backend API, in-memory store.
    pub fn mock(config: ClientConfig) -> Result<Self> {
        tracing::info!("Using mock identity provider and API");
        let session = SessionManager::new(TokenVault::spawn(MemorySecretBackend::new())?);
        Ok(Self::new(
            config,
            Arc::new(MockIdentityProvider::default().with_delay(MOCK_IDENTITY_DELAY)),
            Arc::new(MockCourtApi::default().with_delay(MOCK_API_DELAY)),
            session,
        ))
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub const fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn sign_in_service(&self) -> SignInService {
        SignInService::new(
            Arc::clone(&self.identity),
            Arc::clone(&self.api),
            self.session.clone(),
        )
    }

    pub fn gift_browser(&self) -> GiftBrowser {
        GiftBrowser::default()
    }

    pub fn search_debouncer(&self) -> (SearchDebouncer, mpsc::UnboundedReceiver<String>) {
        SearchDebouncer::new(self.config.search_debounce())
    }
}
