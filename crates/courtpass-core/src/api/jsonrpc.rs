//! JSON-RPC 2.0 envelopes and the `auth.firebaseLogin` payloads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::User;

pub const JSONRPC_VERSION: &str = "2.0";
pub const FIREBASE_LOGIN_METHOD: &str = "auth.firebaseLogin";
pub const REQUEST_ID: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonRpcRequest<'a, P> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: P,
    pub id: u64,
}

impl<'a, P: Serialize> JsonRpcRequest<'a, P> {
    pub const fn new(method: &'a str, params: P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
            id: REQUEST_ID,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<R> {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    pub result: Option<R>,
    #[serde(default)]
    pub error: Option<JsonRpcErrorPayload>,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JsonRpcErrorPayload {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl<R> JsonRpcResponse<R> {
    /// An `error` member wins over `result`; an envelope with neither is malformed.
    pub fn into_result(self) -> Result<R> {
        if let Some(error) = self.error {
            return Err(Error::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        self.result.ok_or(Error::DecodingFailed)
    }
}

/// Decode a response body into its result payload.
pub fn decode_response<R: DeserializeOwned>(body: &[u8]) -> Result<R> {
    let envelope: JsonRpcResponse<R> = serde_json::from_slice(body).map_err(|error| {
        tracing::warn!("Malformed JSON-RPC response: {}", error);
        Error::DecodingFailed
    })?;
    envelope.into_result()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirebaseLoginParams<'a> {
    #[serde(rename = "fbIdToken")]
    pub fb_id_token: &'a str,
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct FirebaseLoginResult {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub me: User,
}

impl std::fmt::Debug for FirebaseLoginResult {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FirebaseLoginResult")
            .field("access_token", &"[REDACTED]")
            .field("me", &self.me)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn request_serializes_to_wire_shape() {
        let request = JsonRpcRequest::new(
            FIREBASE_LOGIN_METHOD,
            FirebaseLoginParams {
                fb_id_token: "<token>",
            },
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "jsonrpc": "2.0",
                "method": "auth.firebaseLogin",
                "params": {"fbIdToken": "<token>"},
                "id": 1
            })
        );
    }

    #[test]
    fn success_envelope_yields_result() {
        let body = br#"{"jsonrpc":"2.0","result":{"accessToken":"abc","me":{"id":"7","name":"Ann","email":"ann@example.com"}},"id":1}"#;
        let result: FirebaseLoginResult = decode_response(body).unwrap();
        assert_eq!(result.access_token, "abc");
        assert_eq!(result.me.name, "Ann");
    }

    #[test]
    fn error_envelope_maps_to_rpc_error() {
        let body = br#"{"jsonrpc":"2.0","error":{"code":401,"message":"Invalid token","data":null},"id":1}"#;
        let error = decode_response::<FirebaseLoginResult>(body).unwrap_err();
        assert!(matches!(
            error,
            Error::Rpc { code: 401, ref message } if message == "Invalid token"
        ));
    }

    #[test]
    fn structured_error_data_still_maps_to_rpc_error() {
        let body = br#"{"error":{"code":401,"message":"Invalid token","data":{"reason":"expired"}}}"#;
        let error = decode_response::<FirebaseLoginResult>(body).unwrap_err();
        assert!(matches!(
            error,
            Error::Rpc { code: 401, ref message } if message == "Invalid token"
        ));

        let envelope: JsonRpcResponse<FirebaseLoginResult> = serde_json::from_slice(
            br#"{"error":{"code":-32000,"message":"boom","data":42},"id":1}"#,
        )
        .unwrap();
        assert_eq!(
            envelope.error.and_then(|error| error.data),
            Some(serde_json::json!(42))
        );
    }

    #[test]
    fn error_wins_over_result() {
        let body = br#"{"jsonrpc":"2.0","result":{"accessToken":"abc","me":{"id":"7","name":"Ann","email":"a@x"}},"error":{"code":-32000,"message":"boom"},"id":1}"#;
        let error = decode_response::<FirebaseLoginResult>(body).unwrap_err();
        assert!(matches!(error, Error::Rpc { code: -32000, .. }));
    }

    #[test]
    fn empty_envelope_is_decoding_failure() {
        let error = decode_response::<FirebaseLoginResult>(br#"{"jsonrpc":"2.0","id":1}"#)
            .unwrap_err();
        assert!(matches!(error, Error::DecodingFailed));
    }

    #[test]
    fn garbage_body_is_decoding_failure() {
        let error = decode_response::<FirebaseLoginResult>(b"<html>").unwrap_err();
        assert!(matches!(error, Error::DecodingFailed));
    }

    #[test]
    fn login_result_debug_redacts_token() {
        let result = FirebaseLoginResult {
            access_token: "secret".to_string(),
            me: User {
                id: "1".to_string(),
                name: "N".to_string(),
                email: "e".to_string(),
            },
        };
        assert!(!format!("{result:?}").contains("secret"));
    }
}
