//! Recipient CSV ingestion.
//!
//! Loads an uploaded contacts file into header names plus row maps ready for
//! field matching and transformation.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use bulksend_ingest::read_csv_table;
//!
//! let table = read_csv_table(Path::new("contacts.csv"))?;
//! println!("{} columns, {} rows", table.headers.len(), table.row_count());
//! ```

mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    CsvTable, MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, duplicate_headers,
    normalize_header, parse_csv, read_csv_table, validate_encoding,
};
