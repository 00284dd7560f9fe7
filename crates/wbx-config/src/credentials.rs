//! Target Wikibase credentials.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Endpoint and bot credentials for the Wikibase that receives new entities.
///
/// Read once at startup. `Debug` never prints the password.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct CredentialsConfig {
    /// Action API URL of the target (e.g., `https://wb.example.org/w/api.php`).
    #[serde(default)]
    pub endpoint_url: String,

    /// Bot username, usually `<account>@<botname>`.
    #[serde(default)]
    pub username: String,

    /// Bot password.
    #[serde(default)]
    pub password: String,
}

impl CredentialsConfig {
    /// Check if every field needed for the login handshake is present.
    pub fn is_configured(&self) -> bool {
        !self.endpoint_url.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }

    /// Fail with [`ConfigError::NotConfigured`] unless [`is_configured`](Self::is_configured).
    pub fn require(&self) -> Result<&Self, ConfigError> {
        if self.is_configured() {
            Ok(self)
        } else {
            Err(ConfigError::NotConfigured {
                section: "credentials".to_string(),
            })
        }
    }
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
