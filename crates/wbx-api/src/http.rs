//! Shared HTTP response helpers.
//!
//! Every action API call goes through [`check_response`] (status codes) and
//! then [`read_envelope`] (`"error"` objects), so callers only deal with
//! successful payloads.

use serde_json::Value;

use crate::error::{ApiError, ServiceError};

/// Check an HTTP response for transport-level failures.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`ApiError::RateLimited`] with `Retry-After`
///   parsing (falls back to 60 s if absent or unparseable).
/// - **Non-success status** → [`ApiError::Status`] with status code and body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(ApiError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(ApiError::Status {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Decode a successful response and reject service-level errors.
///
/// Warnings are logged and otherwise ignored.
pub async fn read_envelope(resp: reqwest::Response) -> Result<Value, ApiError> {
    let body: Value = check_response(resp).await?.json().await?;
    into_envelope(body)
}

pub(crate) fn into_envelope(body: Value) -> Result<Value, ApiError> {
    if let Some(error) = body.get("error") {
        return Err(ApiError::Service(ServiceError::from_payload(error.clone())));
    }
    if let Some(warnings) = body.get("warnings") {
        tracing::warn!(%warnings, "action API returned warnings");
    }
    Ok(body)
}

/// Look up a string at a dotted path, e.g. `query.tokens.csrftoken`.
pub(crate) fn require_str<'a>(body: &'a Value, path: &str) -> Result<&'a str, ApiError> {
    path.split('.')
        .try_fold(body, |node, key| node.get(key))
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::MissingField(path.to_string()))
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
