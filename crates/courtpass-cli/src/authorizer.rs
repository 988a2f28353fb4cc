//! Terminal stand-in for the native Apple/Google sign-in sheets.
//!
//! The identity token comes from `--id-token`, `COURTPASS_ID_TOKEN`, or a
//! prompt on stdin. An empty answer cancels.

use std::io::{self, Write};

use async_trait::async_trait;
use courtpass_core::auth::{AuthorizationOutcome, AuthorizationRequest, NativeAuthorizer};
use courtpass_core::util::normalize_text_option;
use tokio::io::{AsyncBufReadExt, BufReader};

pub const ENV_ID_TOKEN: &str = "COURTPASS_ID_TOKEN";

pub struct TerminalAuthorizer {
    supplied_token: Option<String>,
}

impl TerminalAuthorizer {
    pub fn new(flag_token: Option<String>, env_token: Option<String>) -> Self {
        Self {
            supplied_token: resolve_supplied_token(flag_token, env_token),
        }
    }

    pub fn from_env(flag_token: Option<String>) -> Self {
        Self::new(flag_token, std::env::var(ENV_ID_TOKEN).ok())
    }
}

/// The flag wins over the environment; blank values count as absent.
pub fn resolve_supplied_token(
    flag_token: Option<String>,
    env_token: Option<String>,
) -> Option<String> {
    normalize_text_option(flag_token).or_else(|| normalize_text_option(env_token))
}

pub fn describe_request(request: &AuthorizationRequest) -> String {
    match request {
        AuthorizationRequest::Apple { nonce, scopes } => format!(
            "Sign in with Apple (scopes: {}). Request the identity token with nonce {}",
            scopes.join(", "),
            nonce.hashed()
        ),
        AuthorizationRequest::Google { client_id } => {
            format!("Sign in with Google using client ID {client_id}")
        }
    }
}

/// Map a prompt answer to an outcome. EOF or a blank line cancels.
pub fn outcome_from_answer(answer: Option<&str>) -> AuthorizationOutcome {
    match answer.map(str::trim) {
        Some(token) if !token.is_empty() => AuthorizationOutcome::Token(Some(token.to_string())),
        _ => AuthorizationOutcome::Cancelled,
    }
}

async fn prompt_for_token() -> io::Result<Option<String>> {
    {
        let mut stderr = io::stderr();
        write!(stderr, "Paste identity token (empty to cancel): ")?;
        stderr.flush()?;
    }
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    lines.next_line().await
}

#[async_trait]
impl NativeAuthorizer for TerminalAuthorizer {
    async fn authorize(&self, request: &AuthorizationRequest) -> AuthorizationOutcome {
        eprintln!("{}", describe_request(request));

        if let Some(token) = &self.supplied_token {
            return AuthorizationOutcome::Token(Some(token.clone()));
        }

        match prompt_for_token().await {
            Ok(answer) => outcome_from_answer(answer.as_deref()),
            Err(error) => AuthorizationOutcome::Failed(format!("failed to read token: {error}")),
        }
    }
}
