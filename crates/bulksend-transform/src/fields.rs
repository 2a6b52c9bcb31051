//! Reading mapped cells out of a CSV row.

use std::collections::BTreeMap;

use bulksend_model::{CUSTOM_FIELD_PREFIX, CsvRow};

/// Trimmed cell of the column mapped to `field`.
///
/// Unmapped fields, missing cells and blank cells all read as `""`.
pub fn mapped_value<'a>(row: &'a CsvRow, mappings: &BTreeMap<String, String>, field: &str) -> &'a str {
    mappings
        .get(field)
        .and_then(|column| row.get(column))
        .map_or("", |value| value.trim())
}

/// Flattens `custom.*` mappings into `key -> value` for one row.
///
/// The `custom.` prefix is dropped from the keys. Blank cells are left out.
pub fn extract_custom_fields(
    row: &CsvRow,
    mappings: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    mappings
        .keys()
        .filter_map(|field| {
            let key = field.strip_prefix(CUSTOM_FIELD_PREFIX)?;
            let value = mapped_value(row, mappings, field);
            (!key.is_empty() && !value.is_empty()).then(|| (key.to_string(), value.to_string()))
        })
        .collect()
}
