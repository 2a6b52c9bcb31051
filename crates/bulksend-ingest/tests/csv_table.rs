use std::fs;

use bulksend_ingest::{IngestError, parse_csv, read_csv_table};

#[test]
fn reads_contacts_file_from_disk() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("contacts.csv");
    fs::write(
        &path,
        "Phone Number, First Name ,Order\n+254712345678,Alice,A123\n+254712345679,Bob,B456\n",
    )
    .expect("write file");

    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(table.headers, vec!["Phone Number", "First Name", "Order"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows[0]["First Name"], "Alice");
    assert_eq!(table.rows[1]["Order"], "B456");
}

#[test]
fn short_rows_are_padded_and_extra_cells_dropped() {
    let input = "Phone,Name,City\n+254712345678\n+254712345679,Bob,Nairobi,extra\n";
    let table = parse_csv(input.as_bytes()).expect("parse csv");

    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0]["Name"], "");
    assert_eq!(table.rows[0]["City"], "");
    assert_eq!(table.rows[1].len(), 3);
    assert_eq!(table.rows[1]["City"], "Nairobi");
}

#[test]
fn blank_rows_are_skipped() {
    let input = "Phone,Name\n+254712345678,Alice\n , \n\n+254712345679,Bob\n";
    let table = parse_csv(input.as_bytes()).expect("parse csv");

    let names: Vec<&str> = table.rows.iter().map(|row| row["Name"].as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

#[test]
fn quoted_cells_keep_commas_and_whitespace() {
    let input = "Phone,Address\n+254712345678,\"  Moi Avenue, Nairobi \"\n";
    let table = parse_csv(input.as_bytes()).expect("parse csv");
    assert_eq!(table.rows[0]["Address"], "  Moi Avenue, Nairobi ");
}

#[test]
fn duplicate_headers_keep_first_column() {
    let input = "Phone,Name,Phone\n+254712345678,Alice,+254799999999\n";
    let table = parse_csv(input.as_bytes()).expect("parse csv");

    assert_eq!(table.headers, vec!["Phone", "Name", "Phone"]);
    assert_eq!(table.rows[0]["Phone"], "+254712345678");
}

#[test]
fn header_only_file_has_no_rows() {
    let table = parse_csv("Phone,Name\n".as_bytes()).expect("parse csv");
    assert_eq!(table.headers.len(), 2);
    assert!(table.is_empty());
}

#[test]
fn blank_header_name_is_rejected() {
    let err = parse_csv("Phone,,Name\n1,2,3\n".as_bytes()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyColumnName { column: 2, .. }));
    assert_eq!(err.to_string(), "column 2 of <input> has an empty header");
}

#[test]
fn invalid_utf8_is_a_parse_error() {
    let err = parse_csv(&b"Phone,Name\n+254712345678,\xff\xfe\xfd\n"[..]).unwrap_err();
    assert!(matches!(err, IngestError::CsvParse { .. }));
}
