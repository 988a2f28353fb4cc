//! Backend JSON-RPC client.

mod client;
pub mod jsonrpc;
mod mock;

use async_trait::async_trait;

use crate::error::Result;

pub use client::CourtApiClient;
pub use jsonrpc::FirebaseLoginResult;
pub use mock::{MockApiOutcome, MockCourtApi};

/// Remote calls the client core makes. Single-shot, no retries.
#[async_trait]
pub trait CourtApi: Send + Sync {
    /// Exchange an identity token for a backend session.
    async fn firebase_login(&self, id_token: &str) -> Result<FirebaseLoginResult>;
}
