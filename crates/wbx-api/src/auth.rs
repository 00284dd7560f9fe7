//! Login handshake against a target Wikibase.
//!
//! 1. `action=query&meta=tokens&type=login` → login token
//! 2. `action=login` with the bot credentials; the session cookie lands in
//!    the client's cookie store
//! 3. `login.result` must be `Success`
//! 4. `action=query&meta=tokens&type=csrf` → edit token

use std::fmt;

use serde_json::Value;

use crate::http::require_str;
use crate::{ApiError, WikibaseClient};

/// Token the service hands to sessions that are not logged in.
const ANONYMOUS_TOKEN: &str = "+\\";

/// Token classes served by `meta=tokens`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Login,
    Csrf,
}

impl TokenType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Csrf => "csrf",
        }
    }

    /// Path of the token inside the `meta=tokens` response.
    #[must_use]
    pub const fn response_path(self) -> &'static str {
        match self {
            Self::Login => "query.tokens.logintoken",
            Self::Csrf => "query.tokens.csrftoken",
        }
    }
}

/// CSRF-class token required on every write. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct EditToken(String);

impl EditToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EditToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EditToken(<redacted>)")
    }
}

/// An authenticated connection to a target Wikibase.
///
/// Valid for the lifetime of the process; there is no refresh.
#[derive(Debug, Clone)]
pub struct Session {
    client: WikibaseClient,
    endpoint_url: String,
}

impl Session {
    /// Action API URL of the target.
    #[must_use]
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// The cookie-carrying client, usable for reads against other services.
    #[must_use]
    pub const fn client(&self) -> &WikibaseClient {
        &self.client
    }
}

impl WikibaseClient {
    /// Request a token of the given class.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingField`] if the token is absent from the
    /// response, or any transport/service error from the call.
    pub async fn fetch_token(&self, api_url: &str, token_type: TokenType) -> Result<String, ApiError> {
        let body = self
            .get(
                api_url,
                &[
                    ("action", "query"),
                    ("meta", "tokens"),
                    ("type", token_type.as_str()),
                    ("format", "json"),
                ],
            )
            .await?;
        Ok(require_str(&body, token_type.response_path())?.to_string())
    }

    async fn login(
        &self,
        api_url: &str,
        username: &str,
        password: &str,
        login_token: &str,
    ) -> Result<(), ApiError> {
        let body = self
            .post(
                api_url,
                &[
                    ("action", "login"),
                    ("lgname", username),
                    ("lgpassword", password),
                    ("lgtoken", login_token),
                    ("format", "json"),
                ],
            )
            .await?;
        check_login_result(&body)
    }
}

fn check_login_result(body: &Value) -> Result<(), ApiError> {
    let result = require_str(body, "login.result")?;
    if result == "Success" {
        return Ok(());
    }
    let reason = match body.pointer("/login/reason") {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    Err(ApiError::LoginFailed {
        result: result.to_string(),
        reason,
    })
}

/// Log in to `endpoint_url` and obtain an edit token.
///
/// Consumes the client: its cookie store becomes the session.
///
/// # Errors
///
/// - [`ApiError::MissingField`] if a token is absent; no later step runs.
/// - [`ApiError::LoginFailed`] if the service rejects the credentials, or
///   hands back an anonymous edit token because the session cookie did not
///   stick.
/// - Any transport or service error from the three calls.
pub async fn authenticate(
    client: WikibaseClient,
    endpoint_url: &str,
    username: &str,
    password: &str,
) -> Result<(Session, EditToken), ApiError> {
    let login_token = client.fetch_token(endpoint_url, TokenType::Login).await?;
    client
        .login(endpoint_url, username, password, &login_token)
        .await?;
    tracing::debug!(endpoint_url, username, "logged in");

    let csrf = client.fetch_token(endpoint_url, TokenType::Csrf).await?;
    if csrf == ANONYMOUS_TOKEN {
        return Err(ApiError::LoginFailed {
            result: "Anonymous".to_string(),
            reason: "edit token was issued to an anonymous session; the login cookie was not retained"
                .to_string(),
        });
    }

    Ok((
        Session {
            client,
            endpoint_url: endpoint_url.to_string(),
        },
        EditToken::new(csrf),
    ))
}
