use std::collections::BTreeMap;

use bulksend_transform::{MappingIssue, validate_mappings};

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().copied().map(String::from).collect()
}

fn mappings(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn complete_mapping_is_valid() {
    let validation = validate_mappings(
        &mappings(&[("phone", "Mobile"), ("body_0", "First Name")]),
        &headers(&["Mobile", "First Name"]),
        &["phone", "body_0"],
    );
    assert!(validation.is_valid());
    assert!(validation.issues.is_empty());
}

#[test]
fn missing_required_mapping_is_an_error() {
    let validation = validate_mappings(
        &mappings(&[("phone", " "), ("fullname", "Name")]),
        &headers(&["Name"]),
        &["phone", "body_0"],
    );

    assert!(!validation.is_valid());
    assert_eq!(
        validation.error_messages(),
        vec![
            "Required field 'phone' is not mapped",
            "Required field 'body_0' is not mapped",
        ]
    );
    assert!(validation.warning_messages().is_empty());
}

#[test]
fn required_mapping_to_absent_column_is_an_error() {
    let validation = validate_mappings(
        &mappings(&[("phone", "Phone Number")]),
        &headers(&["Mobile"]),
        &["phone"],
    );

    let errors: Vec<&MappingIssue> = validation.errors().collect();
    assert_eq!(
        errors,
        vec![&MappingIssue::RequiredColumnMissing {
            field: "phone".to_string(),
            column: "Phone Number".to_string(),
        }]
    );
    // Reported once, as an error, not again as a dangling-column warning.
    assert_eq!(
        validation.warnings().collect::<Vec<_>>(),
        vec![&MappingIssue::UnusedColumns {
            columns: vec!["Mobile".to_string()],
        }]
    );
}

#[test]
fn optional_problems_are_warnings() {
    let validation = validate_mappings(
        &mappings(&[
            ("phone", "Mobile"),
            ("fullname", "Name"),
            ("body_0", "Name"),
            ("email", "E-mail"),
        ]),
        &headers(&["Mobile", "Name", "City", "Notes"]),
        &["phone"],
    );

    assert!(validation.is_valid());
    assert_eq!(
        validation.warnings().cloned().collect::<Vec<_>>(),
        vec![
            MappingIssue::ColumnMissing {
                field: "email".to_string(),
                column: "E-mail".to_string(),
            },
            MappingIssue::DuplicateColumn {
                column: "Name".to_string(),
                fields: vec!["body_0".to_string(), "fullname".to_string()],
            },
            MappingIssue::UnusedColumns {
                columns: vec!["City".to_string(), "Notes".to_string()],
            },
        ]
    );
}
