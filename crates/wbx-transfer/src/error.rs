//! Transfer error types.

use thiserror::Error;
use wbx_api::ApiError;
use wbx_core::IdMapping;

#[derive(Debug, Error)]
pub enum TransferError {
    /// A request to the source or target failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Nothing to transfer.
    #[error("no entities to transfer")]
    EmptyBatch,

    /// The source response has no usable entity for a requested identifier.
    #[error("entity '{0}' was not returned by the source")]
    MissingEntity(String),

    /// A property (or property row) has no datatype.
    #[error("property '{0}' has no datatype")]
    MissingDatatype(String),

    /// Tabular input lacks a required column.
    #[error("tabular input is missing required column '{0}'")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A creation failed under [`FailurePolicy::StopOnError`](crate::FailurePolicy).
    /// `completed` holds every entity created before the failure.
    #[error(
        "transfer stopped at '{failed_id}' after {} successful creation(s)",
        .completed.len()
    )]
    Aborted {
        failed_id: String,
        completed: Vec<IdMapping>,
        source: ApiError,
    },
}

impl TransferError {
    /// The API error behind this failure, if any.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) | Self::Aborted { source: err, .. } => Some(err),
            _ => None,
        }
    }

    /// Entities created before the failure. Empty for errors raised before
    /// any creation.
    #[must_use]
    pub fn completed(&self) -> &[IdMapping] {
        match self {
            Self::Aborted { completed, .. } => completed,
            _ => &[],
        }
    }
}
