//! Offline stand-in for the backend.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::{CourtApi, FirebaseLoginResult};
use crate::error::{Error, Result};
use crate::models::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockApiOutcome {
    Success,
    HttpStatus(u16),
    Rpc { code: i64, message: String },
}

/// Issues a session for any token. Tokens that mention "apple" sign in the
/// Apple demo user; everything else signs in the Google one.
#[derive(Debug, Clone)]
pub struct MockCourtApi {
    outcome: MockApiOutcome,
    delay: Duration,
}

impl Default for MockCourtApi {
    fn default() -> Self {
        Self::new(MockApiOutcome::Success)
    }
}

impl MockCourtApi {
    pub const fn new(outcome: MockApiOutcome) -> Self {
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
impl CourtApi for MockCourtApi {
    async fn firebase_login(&self, id_token: &str) -> Result<FirebaseLoginResult> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.outcome {
            MockApiOutcome::HttpStatus(status) => return Err(Error::HttpStatus(*status)),
            MockApiOutcome::Rpc { code, message } => {
                return Err(Error::Rpc {
                    code: *code,
                    message: message.clone(),
                })
            }
            MockApiOutcome::Success => {}
        }

        let (name, email) = if id_token.contains("apple") {
            ("John Appleseed", "john.appleseed@icloud.com")
        } else {
            ("Jane Google", "jane.google@gmail.com")
        };
        let id = Uuid::now_v7().simple().to_string();

        Ok(FirebaseLoginResult {
            access_token: format!("mock_access_token_{}", &id[id.len() - 12..]),
            me: User {
                id: id[id.len() - 4..].to_string(),
                name: name.to_string(),
                email: email.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn apple_tokens_sign_in_apple_user() {
        let api = MockCourtApi::default();
        let result = api.firebase_login("mock_apple_id_token_1").await.unwrap();
        assert_eq!(result.me.name, "John Appleseed");
        assert!(result.access_token.starts_with("mock_access_token_"));

        let result = api.firebase_login("mock_google_id_token_1").await.unwrap();
        assert_eq!(result.me.email, "jane.google@gmail.com");
    }

    #[tokio::test]
    async fn scripted_failures_are_returned() {
        let api = MockCourtApi::new(MockApiOutcome::HttpStatus(500));
        assert!(matches!(
            api.firebase_login("t").await.unwrap_err(),
            Error::HttpStatus(500)
        ));

        let api = MockCourtApi::new(MockApiOutcome::Rpc {
            code: 401,
            message: "Invalid token".to_string(),
        });
        assert_eq!(
            api.firebase_login("t").await.unwrap_err().user_message(),
            "Invalid token"
        );
    }
}
