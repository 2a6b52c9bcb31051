//! Terminal tables for command results.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use bulksend_model::{
    ConfidenceLevel, ConfidenceThresholds, FieldDefinition, MappingResult, ValidationError,
};
use bulksend_transform::{MappingIssue, MappingValidation, Severity, TransformResult};

use crate::pipeline::MapReport;

/// Row errors listed before the table is cut off.
pub const MAX_ERROR_ROWS: usize = 50;

/// One row per target field and template slot.
pub fn mapping_table(report: &MapReport, fields: &[FieldDefinition]) -> Table {
    let thresholds = ConfidenceThresholds::default();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Column"),
        header_cell("Confidence"),
        header_cell("Level"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    let slot_fields: Vec<FieldDefinition> = report
        .param_counts
        .slots()
        .map(|(kind, index)| FieldDefinition::slot(kind, index))
        .collect();
    for field in fields.iter().chain(&slot_fields) {
        let result = &report.result;
        let key_cell = if field.required {
            Cell::new(format!("{} *", field.key)).add_attribute(Attribute::Bold)
        } else {
            Cell::new(&field.key)
        };
        let (column_cell, confidence_cell, level_cell) = match result.column_for(&field.key) {
            Some(column) => {
                let confidence = result.confidence_for(&field.key).unwrap_or_default();
                (
                    Cell::new(column),
                    Cell::new(format!("{confidence:.2}")),
                    level_cell(thresholds.categorize(confidence)),
                )
            }
            None if field.required => (
                Cell::new("missing").fg(Color::Red).add_attribute(Attribute::Bold),
                dim_cell("-"),
                dim_cell("-"),
            ),
            None => (dim_cell("-"), dim_cell("-"), dim_cell("-")),
        };
        table.add_row(vec![
            key_cell,
            Cell::new(&field.label),
            column_cell,
            confidence_cell,
            level_cell,
        ]);
    }
    table
}

/// Matches below the confidence cutoff. `None` when there are none.
pub fn suggestion_table(result: &MappingResult) -> Option<Table> {
    if result.suggestions.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Suggested column"),
        header_cell("Score"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for suggestion in &result.suggestions {
        table.add_row(vec![
            Cell::new(&suggestion.target),
            Cell::new(&suggestion.column).fg(Color::Yellow),
            Cell::new(format!("{:.2}", suggestion.score)),
        ]);
    }
    Some(table)
}

/// Pre-flight issues, errors first. `None` when the mapping is clean.
pub fn issue_table(validation: &MappingValidation) -> Option<Table> {
    if validation.issues.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Severity"), header_cell("Message")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    let ordered = validation.errors().chain(validation.warnings());
    for issue in ordered {
        table.add_row(vec![severity_cell(issue), Cell::new(issue)]);
    }
    Some(table)
}

/// Row errors, capped at [`MAX_ERROR_ROWS`]. `None` when there are none.
pub fn row_error_table(errors: &[ValidationError]) -> Option<Table> {
    if errors.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Message"),
        header_cell("Value"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for error in errors.iter().take(MAX_ERROR_ROWS) {
        table.add_row(vec![
            Cell::new(error.row),
            Cell::new(&error.field),
            Cell::new(&error.message).fg(Color::Red),
            match &error.value {
                Some(value) => Cell::new(value),
                None => dim_cell("-"),
            },
        ]);
    }
    if errors.len() > MAX_ERROR_ROWS {
        table.add_row(vec![
            dim_cell("..."),
            dim_cell(format!("{} more", errors.len() - MAX_ERROR_ROWS)),
            dim_cell(""),
            dim_cell(""),
        ]);
    }
    Some(table)
}

/// Totals for a transformation.
pub fn transform_summary_table(result: &TransformResult, row_count: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows"),
        header_cell("Recipients"),
        header_cell("Skipped"),
        header_cell("Rows with errors"),
        header_cell("Errors"),
    ]);
    apply_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(row_count).add_attribute(Attribute::Bold),
        Cell::new(result.valid_count).fg(Color::Green),
        count_cell(result.invalid_count, Color::Yellow),
        count_cell(result.rows_with_errors(), Color::Red),
        count_cell(result.errors.len(), Color::Red),
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn level_cell(level: Option<ConfidenceLevel>) -> Cell {
    match level {
        Some(level @ ConfidenceLevel::High) => Cell::new(level.label()).fg(Color::Green),
        Some(level @ ConfidenceLevel::Medium) => Cell::new(level.label()).fg(Color::Yellow),
        Some(level @ ConfidenceLevel::Low) => Cell::new(level.label()).fg(Color::Red),
        None => dim_cell("-"),
    }
}

fn severity_cell(issue: &MappingIssue) -> Cell {
    match issue.severity() {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
