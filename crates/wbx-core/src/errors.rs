//! Cross-cutting error types for wbx.
//!
//! Network and service errors live in `wbx-api`, transfer errors in
//! `wbx-transfer`. The binary converges all of them into `anyhow::Error`.

use thiserror::Error;

/// Errors that can be raised by any wbx crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (unknown entity kind, empty identifier, ...).
    #[error("Validation error: {0}")]
    Validation(String),
}
