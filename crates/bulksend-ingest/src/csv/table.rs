//! In-memory CSV table.

use bulksend_model::CsvRow;
use serde::{Deserialize, Serialize};

/// Parsed CSV: header names plus one map per data row.
///
/// Every row has an entry for every header; short records are padded with
/// empty strings. When a header name repeats, rows keep the first column's
/// cell under that name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Up to `limit` distinct non-blank values of `column`, in row order.
    pub fn sample_values(&self, column: &str, limit: usize) -> Vec<&str> {
        let mut samples: Vec<&str> = Vec::new();
        for value in self.rows.iter().filter_map(|row| row.get(column)) {
            if samples.len() >= limit {
                break;
            }
            let value = value.trim();
            if !value.is_empty() && !samples.contains(&value) {
                samples.push(value);
            }
        }
        samples
    }
}
