//! # wbx-core
//!
//! Core types shared by every wbx crate.
//!
//! - Entity records as they travel between a source knowledge base and a
//!   target Wikibase (labels, descriptions, aliases, datatype)
//! - The back-reference claim attached to copied entities
//! - The source-to-target identifier mapping produced by a copy run
//! - Tabular records used for bulk creation
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;

pub use entities::{Claim, DataValue, EntityRecord, IdMapping, Snak, TabularRecord, Term};
pub use enums::EntityKind;
pub use errors::CoreError;
