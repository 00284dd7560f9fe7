//! Turning source entities and tabular rows into creation payloads.

use wbx_core::{Claim, EntityKind, EntityRecord, TabularRecord};

use crate::TransferError;

/// Build the `wbeditentity` payload for a copied entity.
///
/// Carries labels, descriptions and aliases over verbatim. Properties also
/// carry their datatype; a datatype on an item is dropped. With
/// `equiv_property`, exactly one claim pointing back at `source_id` is
/// attached.
///
/// # Errors
///
/// [`TransferError::MissingDatatype`] if `kind` is a property and the source
/// has no datatype.
pub fn copy_payload(
    source: &EntityRecord,
    source_id: &str,
    kind: EntityKind,
    equiv_property: Option<&str>,
) -> Result<EntityRecord, TransferError> {
    let datatype = if kind.requires_datatype() {
        let datatype = source
            .datatype
            .clone()
            .ok_or_else(|| TransferError::MissingDatatype(source_id.to_string()))?;
        Some(datatype)
    } else {
        None
    };

    Ok(EntityRecord {
        labels: source.labels.clone(),
        descriptions: source.descriptions.clone(),
        aliases: source.aliases.clone(),
        datatype,
        claims: equiv_property.map(|property| vec![Claim::back_reference(property, source_id)]),
    })
}

/// Build the payload for one tabular row: a single label and description in
/// `language`, plus the datatype for properties.
///
/// # Errors
///
/// [`TransferError::MissingDatatype`] (naming `row_key`) if `kind` is a
/// property and the row's datatype is empty.
pub fn tabular_payload(
    row: &TabularRecord,
    row_key: &str,
    language: &str,
    kind: EntityKind,
) -> Result<EntityRecord, TransferError> {
    let mut record = EntityRecord::from_terms(language, &row.label, &row.description);
    if kind.requires_datatype() {
        let datatype = row
            .datatype
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| TransferError::MissingDatatype(row_key.to_string()))?;
        record.datatype = Some(datatype.to_string());
    }
    Ok(record)
}
