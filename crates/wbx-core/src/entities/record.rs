use std::collections::BTreeMap;

use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};

use super::Claim;

/// Language code → term.
pub type TermMap = BTreeMap<String, Term>;

/// Language code → ordered aliases.
pub type AliasMap = BTreeMap<String, Vec<Term>>;

/// A piece of text tagged with its language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub language: String,
    pub value: String,
}

impl Term {
    pub fn new(language: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            value: value.into(),
        }
    }
}

/// The fingerprint of an entity plus the fields needed to create it.
///
/// Deserializing a source entity only captures labels, descriptions, aliases
/// and datatype. Statements, sitelinks and every other field are dropped.
/// `claims` is write-side only and never read back from a source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(default, deserialize_with = "map_or_empty_array")]
    pub labels: TermMap,

    #[serde(default, deserialize_with = "map_or_empty_array")]
    pub descriptions: TermMap,

    #[serde(default, deserialize_with = "map_or_empty_array")]
    pub aliases: AliasMap,

    /// Value type held by a property (`string`, `wikibase-item`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,

    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub claims: Option<Vec<Claim>>,
}

impl EntityRecord {
    /// Build a record holding a single label and description in `language`.
    pub fn from_terms(language: &str, label: &str, description: &str) -> Self {
        let mut record = Self::default();
        record
            .labels
            .insert(language.to_string(), Term::new(language, label));
        record
            .descriptions
            .insert(language.to_string(), Term::new(language, description));
        record
    }

    /// Label in `language`, if present.
    #[must_use]
    pub fn label(&self, language: &str) -> Option<&str> {
        self.labels.get(language).map(|t| t.value.as_str())
    }
}

/// PHP-backed APIs encode an empty associative array as `[]`; accept it as an
/// empty map.
fn map_or_empty_array<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrSeq<V> {
        Map(BTreeMap<String, V>),
        Seq(Vec<IgnoredAny>),
    }

    match MapOrSeq::<V>::deserialize(deserializer)? {
        MapOrSeq::Map(map) => Ok(map),
        MapOrSeq::Seq(items) if items.is_empty() => Ok(BTreeMap::new()),
        MapOrSeq::Seq(_) => Err(de::Error::custom(
            "expected a map keyed by language code, found a non-empty array",
        )),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn captures_only_fingerprint_fields() {
        let source = json!({
            "type": "item",
            "id": "Q1",
            "labels": {"en": {"language": "en", "value": "Universe"}},
            "descriptions": {"en": {"language": "en", "value": "the totality of space and time"}},
            "aliases": {"en": [{"language": "en", "value": "cosmos"}]},
            "claims": {"P31": [{"mainsnak": {}}]},
            "sitelinks": {"enwiki": {"site": "enwiki", "title": "Universe"}}
        });

        let record: EntityRecord = serde_json::from_value(source).unwrap();
        assert_eq!(record.label("en"), Some("Universe"));
        assert_eq!(record.aliases["en"], vec![Term::new("en", "cosmos")]);
        assert!(record.claims.is_none());
        assert!(record.datatype.is_none());
    }

    #[test]
    fn empty_array_term_maps_become_empty_maps() {
        let record: EntityRecord =
            serde_json::from_value(json!({"labels": [], "descriptions": [], "aliases": []}))
                .unwrap();
        assert!(record.labels.is_empty());
        assert!(record.descriptions.is_empty());
        assert!(record.aliases.is_empty());
    }

    #[test]
    fn non_empty_array_is_rejected() {
        let result: Result<EntityRecord, _> =
            serde_json::from_value(json!({"labels": [{"language": "en", "value": "x"}]}));
        assert!(result.is_err());
    }

    #[test]
    fn missing_term_maps_default_to_empty() {
        let record: EntityRecord = serde_json::from_value(json!({"datatype": "string"})).unwrap();
        assert!(record.labels.is_empty());
        assert_eq!(record.datatype.as_deref(), Some("string"));
    }

    #[test]
    fn serialized_item_has_exactly_term_keys() {
        let record = EntityRecord::from_terms("en", "Universe", "the totality of space and time");
        let value = serde_json::to_value(&record).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["aliases", "descriptions", "labels"]);
        assert_eq!(value["aliases"], json!({}));
    }
}
