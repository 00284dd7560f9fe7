//! API error types.

use std::fmt;

use thiserror::Error;

/// Errors that can occur when talking to a Wikibase action API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The service returned 429 Too Many Requests. Not retried.
    #[error("rate limited (server asked to retry after {retry_after_secs}s)")]
    RateLimited {
        /// Seconds the server asked clients to wait.
        retry_after_secs: u64,
    },

    /// A well-formed response carried an `"error"` object.
    #[error("service error: {0}")]
    Service(ServiceError),

    /// An expected key was absent from a response.
    #[error("response is missing field '{0}'")]
    MissingField(String),

    /// The login step answered with a status other than `Success`.
    #[error("login failed ({result}): {reason}")]
    LoginFailed {
        /// Value of `login.result` (e.g. `Failed`, `Aborted`).
        result: String,
        /// Human-readable reason from the service.
        reason: String,
    },

    /// A payload could not be encoded or a response could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Service error code, if this is a service-level error.
    #[must_use]
    pub fn service_code(&self) -> Option<&str> {
        match self {
            Self::Service(err) => Some(err.code.as_str()),
            _ => None,
        }
    }
}

/// The `"error"` object of an action API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceError {
    /// Machine-readable code (`no-such-entity`, `badtoken`, `failed-save`, ...).
    pub code: String,
    /// Human-readable message.
    pub info: String,
    /// The complete error object as returned by the service.
    pub payload: serde_json::Value,
}

impl ServiceError {
    pub fn from_payload(payload: serde_json::Value) -> Self {
        let field = |key: &str| {
            payload
                .get(key)
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            code: field("code"),
            info: field("info"),
            payload,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.info.is_empty() {
            write!(f, "{} {}", self.code, self.payload)
        } else {
            write!(f, "{}: {}", self.code, self.info)
        }
    }
}
