//! HTTP client settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_user_agent() -> String {
    concat!("wbx/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// `User-Agent` sent with every request. Wikimedia APIs reject
    /// anonymous agents.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout. Unset keeps the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

impl HttpConfig {
    /// Reject settings reqwest would accept but that make every call fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "http.user_agent".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "http.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
