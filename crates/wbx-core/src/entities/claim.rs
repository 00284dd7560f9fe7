use serde::{Deserialize, Serialize};

/// A statement attached to an entity at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub mainsnak: Snak,
    #[serde(rename = "type")]
    pub statement_type: String,
    pub rank: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snak {
    pub snaktype: String,
    pub property: String,
    pub datavalue: DataValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataValue {
    pub value: String,
    #[serde(rename = "type")]
    pub value_type: String,
}

impl Claim {
    /// Statement recording the identifier an entity was copied from.
    ///
    /// `property` must exist on the target and accept plain string values
    /// (typically an `external-id` property).
    pub fn back_reference(property: &str, source_id: &str) -> Self {
        Self {
            mainsnak: Snak {
                snaktype: "value".to_string(),
                property: property.to_string(),
                datavalue: DataValue {
                    value: source_id.to_string(),
                    value_type: "string".to_string(),
                },
            },
            statement_type: "statement".to_string(),
            rank: "normal".to_string(),
        }
    }
}
