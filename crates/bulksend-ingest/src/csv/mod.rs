//! CSV reading utilities.

mod header;
mod reader;
mod table;

pub use header::{duplicate_headers, normalize_header};
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, parse_csv, read_csv_table,
    validate_encoding,
};
pub use table::CsvTable;
