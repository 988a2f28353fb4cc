use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::jsonrpc::{
    decode_response, FirebaseLoginParams, FirebaseLoginResult, JsonRpcRequest,
    FIREBASE_LOGIN_METHOD,
};
use super::CourtApi;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::util::compact_text;

/// HTTP transport for the backend's JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct CourtApiClient {
    endpoint: String,
    client: Client,
}

impl CourtApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.http_timeout()).build()?;
        Ok(Self {
            endpoint: config.rpc_endpoint.clone(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call<P, R>(&self, method: &str, params: P) -> Result<R>
    where
        P: Serialize + Send,
        R: DeserializeOwned,
    {
        let body = JsonRpcRequest::new(method, params);
        tracing::debug!("POST {} method={}", self.endpoint, method);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(
                "{} returned HTTP {}: {}",
                method,
                status.as_u16(),
                compact_text(&text)
            );
            return Err(Error::HttpStatus(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        decode_response(&bytes)
    }
}

#[async_trait]
impl CourtApi for CourtApiClient {
    async fn firebase_login(&self, id_token: &str) -> Result<FirebaseLoginResult> {
        if id_token.trim().is_empty() {
            return Err(Error::AuthTokenMissing);
        }

        let result: FirebaseLoginResult = self
            .call(
                FIREBASE_LOGIN_METHOD,
                FirebaseLoginParams {
                    fb_id_token: id_token,
                },
            )
            .await?;
        tracing::info!("Federated login succeeded for user {}", result.me.id);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_uses_configured_endpoint() {
        let config = ClientConfig {
            rpc_endpoint: "http://127.0.0.1:9/rpc".to_string(),
            ..ClientConfig::default()
        };
        let client = CourtApiClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/rpc");
    }

    #[tokio::test]
    async fn empty_token_is_rejected_before_any_request() {
        let config = ClientConfig {
            rpc_endpoint: "http://127.0.0.1:9/rpc".to_string(),
            ..ClientConfig::default()
        };
        let client = CourtApiClient::new(&config).unwrap();
        let error = client.firebase_login("  ").await.unwrap_err();
        assert!(matches!(error, Error::AuthTokenMissing));
    }
}
