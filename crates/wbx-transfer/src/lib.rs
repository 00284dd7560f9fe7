//! # wbx-transfer
//!
//! Copies entities from a source knowledge base into a target Wikibase, or
//! creates them from tabular rows, and reports which target identifier each
//! input became.
//!
//! ```text
//! ids ──► one wbgetentities call ──► validate every entity ──► payloads
//!                                                              │
//!                  mapping ◄── entity.id ◄── wbeditentity ◄────┘ (one by one, in order)
//! ```
//!
//! Nothing is created until every requested entity has been fetched and
//! turned into a valid payload. Creation failures follow the engine's
//! [`FailurePolicy`].

mod engine;
mod error;
mod payload;
mod policy;
mod report;
mod tabular;

pub use engine::{CopyRequest, TransferEngine};
pub use error::TransferError;
pub use payload::{copy_payload, tabular_payload};
pub use policy::FailurePolicy;
pub use report::{ItemFailure, TransferReport};
pub use tabular::{load_tabular_file, load_tabular_records};
