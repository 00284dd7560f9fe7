//! Entity kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// The two kinds of Wikibase entity this toolkit creates.
///
/// The kind is fixed at creation time. Properties additionally carry a
/// datatype; items never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Item,
    Property,
}

impl EntityKind {
    /// Value used for the `new=` parameter of `wbeditentity`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Property => "property",
        }
    }

    /// Whether entities of this kind must carry a `datatype`.
    #[must_use]
    pub const fn requires_datatype(self) -> bool {
        matches!(self, Self::Property)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "item" => Ok(Self::Item),
            "property" => Ok(Self::Property),
            other => Err(CoreError::Validation(format!(
                "unknown entity kind '{other}' (expected 'item' or 'property')"
            ))),
        }
    }
}
