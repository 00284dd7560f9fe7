//! Outcome of a transfer run.

use serde::Serialize;
use wbx_api::ApiError;
use wbx_core::IdMapping;

/// Mapping of every created entity plus the items that failed.
///
/// `mapping` only ever holds successful creations, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransferReport {
    pub mapping: Vec<IdMapping>,
    pub failures: Vec<ItemFailure>,
}

impl TransferReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A creation that failed under `ContinueOnError`.
#[derive(Debug, Clone, Serialize)]
pub struct ItemFailure {
    pub source_id: String,
    /// Service error code, when the service reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    /// Full service error object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl ItemFailure {
    pub(crate) fn new(source_id: &str, error: &ApiError) -> Self {
        let payload = match error {
            ApiError::Service(service) => Some(service.payload.clone()),
            _ => None,
        };
        Self {
            source_id: source_id.to_string(),
            code: error.service_code().map(str::to_string),
            message: error.to_string(),
            payload,
        }
    }
}
