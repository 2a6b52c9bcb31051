//! CSV loading with size and encoding guards.

use std::io::Read;
use std::path::Path;

use bulksend_model::CsvRow;
use csv::ReaderBuilder;
use tracing::{debug, warn};

use super::header::{duplicate_headers, normalize_headers};
use super::table::CsvTable;
use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (50 MB).
pub const MAX_CSV_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Origin label for inputs that are not files.
const INPUT_ORIGIN: &str = "<input>";

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

fn file_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| file_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Rejects UTF-16 input. A UTF-8 BOM is fine.
pub fn validate_encoding(bytes: &[u8], origin: &str) -> Result<()> {
    let encoding = match bytes {
        [0xFF, 0xFE, ..] => "UTF-16 LE",
        [0xFE, 0xFF, ..] => "UTF-16 BE",
        _ => return Ok(()),
    };
    Err(IngestError::UnsupportedEncoding {
        origin: origin.to_string(),
        encoding,
    })
}

/// Reads a CSV file with a header row.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    check_file_size(path)?;
    let bytes = std::fs::read(path).map_err(|e| file_error(path, e))?;
    parse_bytes(&bytes, &path.display().to_string())
}

/// Parses CSV text with a header row from any reader.
pub fn parse_csv<R: Read>(mut reader: R) -> Result<CsvTable> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| IngestError::Read {
            origin: INPUT_ORIGIN.to_string(),
            source,
        })?;
    parse_bytes(&bytes, INPUT_ORIGIN)
}

fn parse_bytes(bytes: &[u8], origin: &str) -> Result<CsvTable> {
    validate_encoding(bytes, origin)?;
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let parse_error = |source| IngestError::CsvParse {
        origin: origin.to_string(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut records = reader.records();

    let header_record = match records.next() {
        Some(record) => record.map_err(parse_error)?,
        None => {
            return Err(IngestError::EmptyCsv {
                origin: origin.to_string(),
            });
        }
    };
    let headers = normalize_headers(&header_record, origin)?;

    let duplicates = duplicate_headers(&headers);
    if !duplicates.is_empty() {
        warn!(
            origin,
            duplicates = ?duplicates,
            "duplicate CSV headers; rows keep the first column's value"
        );
    }

    let mut rows = Vec::new();
    let mut blank_rows = 0usize;
    for record in records {
        let record = record.map_err(parse_error)?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            blank_rows += 1;
            continue;
        }
        let mut row = CsvRow::new();
        for (idx, header) in headers.iter().enumerate() {
            row.entry(header.clone())
                .or_insert_with(|| record.get(idx).unwrap_or_default().to_string());
        }
        rows.push(row);
    }

    debug!(
        origin,
        columns = headers.len(),
        rows = rows.len(),
        blank_rows,
        "parsed CSV"
    );
    Ok(CsvTable { headers, rows })
}
