//! Integration tests for the JSON-RPC client against a mock HTTP server.

use std::sync::Arc;

use courtpass_core::api::{CourtApi, CourtApiClient};
use courtpass_core::auth::{AuthProvider, MockIdentityProvider};
use courtpass_core::config::ClientConfig;
use courtpass_core::services::SignInService;
use courtpass_core::session::SessionManager;
use courtpass_core::store::{MemorySecretBackend, TokenVault};
use courtpass_core::{Error, Session, User};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CourtApiClient {
    let config = ClientConfig {
        rpc_endpoint: format!("{}/rpc/client", server.uri()),
        ..ClientConfig::default()
    };
    CourtApiClient::new(&config).unwrap()
}

fn login_envelope() -> serde_json::Value {
    json!({
        "jsonrpc": "2.0",
        "result": {
            "accessToken": "server-access-token",
            "me": { "id": "7", "name": "Ana", "email": "ana@example.com" }
        },
        "id": 1
    })
}

#[tokio::test]
async fn firebase_login_sends_exact_request_and_decodes_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rpc/client"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "jsonrpc": "2.0",
            "method": "auth.firebaseLogin",
            "params": { "fbIdToken": "provider-token" },
            "id": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .firebase_login("provider-token")
        .await
        .unwrap();

    assert_eq!(result.access_token, "server-access-token");
    assert_eq!(
        result.me,
        User {
            id: "7".to_string(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
        }
    );
}

#[tokio::test]
async fn non_success_status_maps_to_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .firebase_login("provider-token")
        .await
        .unwrap_err();

    assert!(matches!(error, Error::HttpStatus(500)));
    assert_eq!(error.user_message(), "HTTP 500");
}

#[tokio::test]
async fn error_envelope_maps_to_rpc_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "error": { "code": 401, "message": "Invalid token" },
            "id": 1
        })))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .firebase_login("provider-token")
        .await
        .unwrap_err();

    match error {
        Error::Rpc { code, ref message } => {
            assert_eq!(code, 401);
            assert_eq!(message, "Invalid token");
        }
        other => panic!("expected rpc error, got {other:?}"),
    }
}

#[tokio::test]
async fn envelope_without_result_or_error_is_a_decoding_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1
        })))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .firebase_login("provider-token")
        .await
        .unwrap_err();
    assert!(matches!(error, Error::DecodingFailed));
}

#[tokio::test]
async fn malformed_body_is_a_decoding_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .firebase_login("provider-token")
        .await
        .unwrap_err();
    assert_eq!(error.user_message(), "Decoding failed");
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    drop(server);

    let error = client.firebase_login("provider-token").await.unwrap_err();
    assert!(matches!(error, Error::Transport(_)));
}

#[tokio::test]
async fn sign_in_service_persists_server_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rpc/client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionManager::new(TokenVault::spawn(MemorySecretBackend::new()).unwrap());
    let service = SignInService::new(
        Arc::new(MockIdentityProvider::default()),
        Arc::new(client_for(&server)),
        session.clone(),
    );

    let user = service.sign_in(AuthProvider::Google).await.unwrap();
    assert_eq!(user.email, "ana@example.com");
    assert_eq!(
        session.current().await.unwrap(),
        Session::new("server-access-token", user)
    );
}
