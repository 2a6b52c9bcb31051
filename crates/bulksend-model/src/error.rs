//! Error types for mapping edits.

use thiserror::Error;

/// Errors raised when a caller edits a mapping by hand.
///
/// Matching and transformation never fail on data; these only cover
/// programmer or operator mistakes while adjusting a proposed mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MappingError {
    /// Field key was empty.
    #[error("Field key must not be empty")]
    EmptyFieldKey,

    /// Column not found in the CSV header row.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Field has no mapping to clear or inspect.
    #[error("Field not mapped: {0}")]
    FieldNotMapped(String),
}

impl MappingError {
    /// Get the field key associated with this error, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::FieldNotMapped(field) => Some(field),
            _ => None,
        }
    }

    /// Get the column name associated with this error, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::ColumnNotFound(column) => Some(column),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MappingError>;
