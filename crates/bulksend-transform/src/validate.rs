//! Pre-flight checks on a confirmed mapping.
//!
//! Run before transforming rows so mapping mistakes surface once instead of
//! as one error per row. Nothing here fails; problems come back as issues.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Transforming with this mapping would produce unusable recipients.
    Error,
    /// Worth a look.
    Warning,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// One problem with a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MappingIssue {
    /// Required field has no column, or a blank one.
    RequiredUnmapped { field: String },
    /// Required field points at a column the CSV does not have.
    RequiredColumnMissing { field: String, column: String },
    /// Optional field points at a column the CSV does not have.
    ColumnMissing { field: String, column: String },
    /// One column feeds several fields.
    DuplicateColumn { column: String, fields: Vec<String> },
    /// Headers no field reads from, in header order.
    UnusedColumns { columns: Vec<String> },
}

impl MappingIssue {
    pub fn severity(&self) -> Severity {
        match self {
            Self::RequiredUnmapped { .. } | Self::RequiredColumnMissing { .. } => Severity::Error,
            Self::ColumnMissing { .. }
            | Self::DuplicateColumn { .. }
            | Self::UnusedColumns { .. } => Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for MappingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequiredUnmapped { field } => write!(f, "Required field '{field}' is not mapped"),
            Self::RequiredColumnMissing { field, column } => write!(
                f,
                "Required field '{field}' is mapped to column '{column}', which is not in the CSV"
            ),
            Self::ColumnMissing { field, column } => write!(
                f,
                "Field '{field}' is mapped to column '{column}', which is not in the CSV"
            ),
            Self::DuplicateColumn { column, fields } => write!(
                f,
                "Column '{column}' is mapped to multiple fields: {}",
                fields.join(", ")
            ),
            Self::UnusedColumns { columns } => write!(
                f,
                "{} column(s) not mapped to any field: {}",
                columns.len(),
                columns.join(", ")
            ),
        }
    }
}

/// Outcome of [`validate_mappings`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingValidation {
    pub issues: Vec<MappingIssue>,
}

impl MappingValidation {
    /// True when there are no errors. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(MappingIssue::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &MappingIssue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &MappingIssue> {
        self.issues.iter().filter(|issue| !issue.is_error())
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors().map(ToString::to_string).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings().map(ToString::to_string).collect()
    }
}

/// Checks `mappings` against the CSV `headers` and the `required_fields`.
///
/// Errors:
/// - a required field is unmapped or mapped to a blank column name
/// - a required field is mapped to a column missing from `headers`
///
/// Warnings:
/// - an optional field is mapped to a column missing from `headers`
/// - a column is mapped to more than one field
/// - some headers are not used by any field (reported once, as a list)
pub fn validate_mappings<S: AsRef<str>>(
    mappings: &BTreeMap<String, String>,
    headers: &[String],
    required_fields: &[S],
) -> MappingValidation {
    let mut issues = Vec::new();
    let has_header = |column: &str| headers.iter().any(|h| h == column);

    for field in required_fields {
        let field = field.as_ref();
        match mappings.get(field).map(String::as_str).filter(|c| !c.trim().is_empty()) {
            None => issues.push(MappingIssue::RequiredUnmapped {
                field: field.to_string(),
            }),
            Some(column) if !has_header(column) => issues.push(MappingIssue::RequiredColumnMissing {
                field: field.to_string(),
                column: column.to_string(),
            }),
            Some(_) => {}
        }
    }

    let is_required = |field: &str| required_fields.iter().any(|r| r.as_ref() == field);
    let mut fields_by_column: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (field, column) in mappings {
        if column.trim().is_empty() {
            continue;
        }
        if !has_header(column) && !is_required(field) {
            issues.push(MappingIssue::ColumnMissing {
                field: field.clone(),
                column: column.clone(),
            });
        }
        fields_by_column.entry(column.as_str()).or_default().push(field.clone());
    }

    issues.extend(
        fields_by_column
            .iter()
            .filter(|(_, fields)| fields.len() > 1)
            .map(|(column, fields)| MappingIssue::DuplicateColumn {
                column: (*column).to_string(),
                fields: fields.clone(),
            }),
    );

    let unused: Vec<String> = headers
        .iter()
        .filter(|h| !fields_by_column.contains_key(h.as_str()))
        .cloned()
        .collect();
    if !unused.is_empty() {
        issues.push(MappingIssue::UnusedColumns { columns: unused });
    }

    MappingValidation { issues }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_field_and_column() {
        let issue = MappingIssue::RequiredColumnMissing {
            field: "phone".to_string(),
            column: "Mobile".to_string(),
        };
        assert_eq!(
            issue.to_string(),
            "Required field 'phone' is mapped to column 'Mobile', which is not in the CSV"
        );
        assert_eq!(issue.severity(), Severity::Error);

        let issue = MappingIssue::UnusedColumns {
            columns: vec!["Notes".to_string(), "City".to_string()],
        };
        assert_eq!(issue.to_string(), "2 column(s) not mapped to any field: Notes, City");
        assert_eq!(issue.severity().label(), "Warning");
    }

    #[test]
    fn empty_inputs_are_valid() {
        let validation = validate_mappings::<&str>(&BTreeMap::new(), &[], &[]);
        assert!(validation.is_valid());
        assert!(validation.issues.is_empty());
    }
}
