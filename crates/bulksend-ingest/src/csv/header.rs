//! CSV header normalization.

use std::collections::BTreeSet;

use csv::StringRecord;

use crate::error::{IngestError, Result};

/// Trims whitespace and a stray UTF-8 BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Normalizes the header record, rejecting blank names.
pub(crate) fn normalize_headers(record: &StringRecord, origin: &str) -> Result<Vec<String>> {
    let headers: Vec<String> = record.iter().map(normalize_header).collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            origin: origin.to_string(),
        });
    }
    if let Some(idx) = headers.iter().position(String::is_empty) {
        return Err(IngestError::EmptyColumnName {
            origin: origin.to_string(),
            column: idx + 1,
        });
    }
    Ok(headers)
}

/// Header names that appear more than once, in first-seen order.
pub fn duplicate_headers(headers: &[String]) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    let mut duplicates: Vec<&str> = Vec::new();
    for header in headers {
        if !seen.insert(header.as_str()) && !duplicates.contains(&header.as_str()) {
            duplicates.push(header);
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Phone  "), "Phone");
        assert_eq!(normalize_header("\u{feff}Phone"), "Phone");
        assert_eq!(normalize_header("First Name"), "First Name");
    }

    #[test]
    fn test_blank_header_is_rejected() {
        let record = StringRecord::from(vec!["Phone", " ", "Name"]);
        let err = normalize_headers(&record, "contacts.csv").unwrap_err();
        assert!(matches!(err, IngestError::EmptyColumnName { column: 2, .. }));

        let record = StringRecord::from(vec!["", " "]);
        let err = normalize_headers(&record, "contacts.csv").unwrap_err();
        assert!(matches!(err, IngestError::EmptyCsv { .. }));
    }

    #[test]
    fn test_duplicate_headers() {
        let headers: Vec<String> = ["Phone", "Name", "Phone", "Phone", "Name", "City"]
            .iter()
            .copied()
            .map(String::from)
            .collect();
        assert_eq!(duplicate_headers(&headers), vec!["Phone", "Name"]);
    }
}
