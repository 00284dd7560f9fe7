//! Entity structs exchanged with Wikibase action APIs.
//!
//! Records are read from a source knowledge base with `wbgetentities` and
//! written to the target with `wbeditentity`. All maps are `BTreeMap`s so a
//! serialized payload is byte-for-byte deterministic.

mod claim;
mod mapping;
mod record;
mod tabular;

pub use claim::{Claim, DataValue, Snak};
pub use mapping::IdMapping;
pub use record::{AliasMap, EntityRecord, Term, TermMap};
pub use tabular::TabularRecord;
