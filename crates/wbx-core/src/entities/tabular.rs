use serde::{Deserialize, Serialize};

/// One row of bulk-creation input.
///
/// `datatype` is only read for properties; CSV files for items may omit the
/// column entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularRecord {
    pub label: String,
    pub description: String,
    #[serde(default)]
    pub datatype: Option<String>,
}
