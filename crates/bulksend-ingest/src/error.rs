//! Error types for CSV ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a CSV.
///
/// `origin` names the input in messages: a file path, or `<input>` for
/// in-memory readers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === CSV Parsing Errors ===
    /// Failed to read from a non-file input.
    #[error("failed to read {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    /// Input starts with a byte order mark for an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {origin}; save the file as UTF-8")]
    UnsupportedEncoding {
        origin: String,
        encoding: &'static str,
    },

    /// Malformed CSV or invalid UTF-8.
    #[error("failed to parse CSV {origin}: {source}")]
    CsvParse {
        origin: String,
        #[source]
        source: csv::Error,
    },

    /// No header row.
    #[error("CSV is empty: {origin}")]
    EmptyCsv { origin: String },

    /// Header row has a blank name.
    #[error("column {column} of {origin} has an empty header")]
    EmptyColumnName { origin: String, column: usize },
}

impl IngestError {
    /// Path of the file involved, for file-level errors.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::FileNotFound { path }
            | Self::FileRead { path, .. }
            | Self::FileTooLarge { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/contacts.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/contacts.csv");
        assert_eq!(err.path(), Some(std::path::Path::new("/path/to/contacts.csv")));

        let err = IngestError::EmptyColumnName {
            origin: "contacts.csv".to_string(),
            column: 3,
        };
        assert_eq!(err.to_string(), "column 3 of contacts.csv has an empty header");
        assert_eq!(err.path(), None);
    }
}
