//! CSV input for bulk creation.
//!
//! Rows need `label` and `description` columns; property files also need a
//! `datatype` column. Other columns are ignored.

use std::io;
use std::path::Path;

use wbx_core::{EntityKind, TabularRecord};

use crate::TransferError;

/// Read tabular records from CSV with a header row.
///
/// # Errors
///
/// [`TransferError::MissingColumn`] if a required column is absent, or
/// [`TransferError::Csv`] for malformed rows.
pub fn load_tabular_records<R: io::Read>(
    reader: R,
    kind: EntityKind,
) -> Result<Vec<TabularRecord>, TransferError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let required: &[&str] = if kind.requires_datatype() {
        &["label", "description", "datatype"]
    } else {
        &["label", "description"]
    };
    if let Some(missing) = required
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(TransferError::MissingColumn((*missing).to_string()));
    }

    rdr.deserialize()
        .map(|row| row.map_err(TransferError::from))
        .collect()
}

/// [`load_tabular_records`] from a file on disk.
///
/// # Errors
///
/// [`TransferError::Io`] if the file cannot be opened, plus everything
/// [`load_tabular_records`] returns.
pub fn load_tabular_file(path: &Path, kind: EntityKind) -> Result<Vec<TabularRecord>, TransferError> {
    let file = std::fs::File::open(path)?;
    load_tabular_records(io::BufReader::new(file), kind)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn reads_item_rows_without_datatype_column() {
        let input = "label,description\nwidget,a small gadget\nsprocket, a toothed wheel \n";
        let rows = load_tabular_records(input.as_bytes(), EntityKind::Item).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].description, "a toothed wheel");
        assert!(rows[0].datatype.is_none());
    }

    #[test]
    fn reads_property_rows() {
        let input = "label,description,datatype,notes\npopulation,number of inhabitants,quantity,ignored\n";
        let rows = load_tabular_records(input.as_bytes(), EntityKind::Property).unwrap();
        assert_eq!(rows[0].datatype.as_deref(), Some("quantity"));
    }

    #[rstest]
    #[case::property_without_datatype("label,description\npopulation,inhabitants\n", EntityKind::Property, "datatype")]
    #[case::missing_label("name,description\nwidget,a small gadget\n", EntityKind::Item, "label")]
    #[case::missing_description("label\nwidget\n", EntityKind::Item, "description")]
    fn missing_required_column_is_rejected(
        #[case] input: &str,
        #[case] kind: EntityKind,
        #[case] column: &str,
    ) {
        let err = load_tabular_records(input.as_bytes(), kind).unwrap_err();
        assert!(matches!(err, TransferError::MissingColumn(c) if c == column));
    }

    #[test]
    fn empty_datatype_cell_is_none() {
        let input = "label,description,datatype\narea,surface size,\n";
        let rows = load_tabular_records(input.as_bytes(), EntityKind::Property).unwrap();
        assert!(rows[0].datatype.is_none());
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let input = "label,description\n\"Paris, Texas\",\"city in Lamar County, Texas\"\n";
        let rows = load_tabular_records(input.as_bytes(), EntityKind::Item).unwrap();
        assert_eq!(rows[0].label, "Paris, Texas");
    }
}
