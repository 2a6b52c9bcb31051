//! Integration tests for the command stages.

use std::fs;
use std::path::PathBuf;

use bulksend_cli::pipeline::{
    load_csv, load_profile, load_template, render_preview, run_matching, run_transform,
    target_fields, write_json,
};
use bulksend_cli::summary::{issue_table, mapping_table, row_error_table, transform_summary_table};
use bulksend_map::MatchOptions;
use bulksend_model::{FieldDefinition, ParamCounts};
use bulksend_transform::{MessageTemplate, TransformOptions};
use tempfile::TempDir;

const CONTACTS: &str = "\
Mobile,Full Name,First Name,Order Number,Tracking URL,Notes
+254712345678,Alice Wanjiru,Alice,A123,https://t.example/A123,vip
0712345679,Bob Otieno,Bob,,https://t.example/B456,
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn map_then_transform_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let csv = write(&dir, "contacts.csv", CONTACTS);
    let table = load_csv(&csv).expect("load csv");
    let fields = target_fields(Vec::new());

    let report = run_matching(
        &table,
        &fields,
        ParamCounts::new(0, 2, 1),
        &MatchOptions::default(),
    );
    let result = &report.result;
    assert_eq!(result.column_for("phone"), Some("Mobile"));
    assert_eq!(result.column_for("fullname"), Some("Full Name"));
    assert_eq!(result.column_for("body_0"), Some("First Name"));
    assert_eq!(result.column_for("body_1"), Some("Order Number"));
    assert_eq!(result.column_for("button_0"), Some("Tracking URL"));
    assert!(report.missing_required.is_empty());
    assert_eq!(report.unused_columns, vec!["Notes"]);

    let profile_path = dir.path().join("mapping.json");
    write_json(&report.to_profile(&fields), Some(&profile_path)).expect("save profile");
    let profile = load_profile(&profile_path).expect("load profile");
    assert_eq!(profile.required_fields, vec!["phone"]);
    assert_eq!(profile.param_counts, ParamCounts::new(0, 2, 1));

    let outcome = run_transform(&table, &profile, &TransformOptions::default());
    assert!(outcome.validation.is_valid());
    let transformed = outcome.result.as_ref().expect("transform ran");
    assert_eq!(transformed.recipients.len(), 2);
    assert_eq!(transformed.recipients[0].phone, "+254712345678");
    assert_eq!(
        transformed.recipients[0].template_params.button_params,
        vec!["https://t.example/A123"]
    );

    // Bob: local number and a missing order number.
    let fields_with_errors: Vec<&str> = transformed
        .errors
        .iter()
        .map(|e| e.field.as_str())
        .collect();
    assert_eq!(fields_with_errors, vec!["phone", "body_1"]);
    assert!(transformed.errors.iter().all(|e| e.row == 2));
    assert!(outcome.has_errors());

    let rendered = row_error_table(&transformed.errors)
        .expect("row errors")
        .to_string();
    assert!(rendered.contains("Invalid phone number format"));
    assert!(rendered.contains("0712345679"));

    let summary = transform_summary_table(transformed, table.row_count()).to_string();
    assert!(summary.contains("Recipients"));
}

#[test]
fn preflight_errors_stop_the_transform() {
    let dir = TempDir::new().expect("temp dir");
    let csv = write(&dir, "contacts.csv", CONTACTS);
    let mapping = write(
        &dir,
        "mapping.json",
        r#"{ "mappings": { "phone": "Phone", "body_0": "First Name" }, "param_counts": { "body": 1 } }"#,
    );
    let table = load_csv(&csv).expect("load csv");
    let profile = load_profile(&mapping).expect("load profile");

    let outcome = run_transform(&table, &profile, &TransformOptions::default());
    assert!(outcome.result.is_none());
    assert!(outcome.has_errors());
    assert_eq!(
        outcome.validation.error_messages(),
        vec!["Required field 'phone' is mapped to column 'Phone', which is not in the CSV"]
    );

    let rendered = issue_table(&outcome.validation).expect("issues").to_string();
    assert!(rendered.contains("ERROR"));
    assert!(rendered.contains("WARN"));
}

#[test]
fn mapping_table_marks_missing_required_field() {
    let dir = TempDir::new().expect("temp dir");
    let csv = write(&dir, "contacts.csv", "City,Notes\nNairobi,x\n");
    let table = load_csv(&csv).expect("load csv");
    let fields = target_fields(vec![FieldDefinition::custom("city", "City")]);

    let report = run_matching(&table, &fields, ParamCounts::default(), &MatchOptions::strict());
    assert_eq!(report.missing_required, vec!["phone"]);
    assert_eq!(report.result.column_for("custom.city"), Some("City"));

    let rendered = mapping_table(&report, &fields).to_string();
    assert!(rendered.contains("phone *"));
    assert!(rendered.contains("missing"));
    assert!(rendered.contains("custom.city"));
}

#[test]
fn preview_reads_template_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        &dir,
        "template.json",
        r#"{ "header": "Order {{1}}", "body": "Hello {{1}}, order {{2}} is on its way" }"#,
    );
    let template = load_template(&path).expect("load template");
    let params = vec!["Alice".to_string()];

    let text = render_preview(&template, &params, false).expect("render");
    insta::assert_snapshot!(text, @r"
    Order Alice

    Hello Alice, order [param_2] is on its way
    ");
}

#[test]
fn named_preview_is_detected_from_body() {
    let template = MessageTemplate::new("Hi {{first_name}}, code {{code}}");
    let params = vec!["first_name=Alice".to_string()];

    let text = render_preview(&template, &params, false).expect("render");
    insta::assert_snapshot!(text, @"Hi Alice, code [code]");

    let positional = vec!["Alice".to_string()];
    assert!(render_preview(&template, &positional, false).is_err());
}

#[test]
fn missing_csv_reports_path() {
    let err = load_csv(std::path::Path::new("/nonexistent/contacts.csv")).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("load csv: /nonexistent/contacts.csv"));
    assert!(message.contains("CSV file not found"));
}
