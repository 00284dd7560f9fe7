//! # wbx-api
//!
//! HTTP client for Wikibase action APIs (`api.php`).
//!
//! - [`authenticate`] runs the login handshake against a target Wikibase and
//!   returns a cookie-carrying [`Session`] plus the [`EditToken`] required by
//!   every write.
//! - [`WikibaseClient::get_entities`] reads entity fingerprints from any
//!   Wikibase, authenticated or not (Wikidata by default).
//! - [`Session::create_entity`] creates a new item or property.
//!
//! Requests are issued one at a time. Nothing is retried: transport
//! failures, non-2xx statuses and `"error"` objects all surface as
//! [`ApiError`].

mod auth;
mod entities;
mod error;
mod http;

pub use auth::{EditToken, Session, TokenType, authenticate};
pub use entities::{EditOptions, EntityBatch, SourceEntity};
pub use error::{ApiError, ServiceError};

use serde_json::Value;
use wbx_config::HttpConfig;

/// Cookie-aware HTTP client for Wikibase action APIs.
///
/// Cloning is cheap and clones share the cookie store, so a clone of an
/// authenticated client stays authenticated.
#[derive(Debug, Clone)]
pub struct WikibaseClient {
    http: reqwest::Client,
}

impl WikibaseClient {
    /// Build a client from HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the TLS backend or the user agent is
    /// rejected by reqwest.
    pub fn new(config: &HttpConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .cookie_store(true);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    pub(crate) async fn get(&self, api_url: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        tracing::debug!(api_url, action = action_of(params), "GET action API");
        let resp = self.http.get(api_url).query(params).send().await?;
        http::read_envelope(resp).await
    }

    pub(crate) async fn post(&self, api_url: &str, form: &[(&str, &str)]) -> Result<Value, ApiError> {
        tracing::debug!(api_url, action = action_of(form), "POST action API");
        let resp = self.http.post(api_url).form(form).send().await?;
        http::read_envelope(resp).await
    }
}

// Only the action name is logged; forms may carry passwords and tokens.
fn action_of<'a>(params: &[(&str, &'a str)]) -> &'a str {
    params
        .iter()
        .find(|(key, _)| *key == "action")
        .map_or("?", |(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_default_config() {
        assert!(WikibaseClient::new(&HttpConfig::default()).is_ok());
    }

    #[test]
    fn client_builds_with_timeout() {
        let config = HttpConfig {
            timeout_secs: Some(5),
            ..Default::default()
        };
        assert!(WikibaseClient::new(&config).is_ok());
    }

    #[test]
    fn action_of_finds_action_param() {
        let form = [("lgname", "bot"), ("action", "login"), ("lgpassword", "secret")];
        assert_eq!(action_of(&form), "login");
        assert_eq!(action_of(&[("format", "json")]), "?");
    }
}
