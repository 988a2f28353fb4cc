//! Signed-in user and session models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend user profile returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Access token plus user. Both absent means signed out.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub const fn signed_out() -> Self {
        Self {
            access_token: None,
            user: None,
        }
    }

    pub fn new(access_token: impl Into<String>, user: User) -> Self {
        Self {
            access_token: Some(access_token.into()),
            user: Some(user),
        }
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.access_token.is_some()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.user.is_none()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Session")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("user", &self.user)
            .finish()
    }
}
