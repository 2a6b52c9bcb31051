//! Command stages shared by the CLI subcommands.
//!
//! Each stage takes already-parsed inputs and returns plain data so it can be
//! exercised without spawning the binary.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use bulksend_ingest::{CsvTable, read_csv_table};
use bulksend_map::{MatchOptions, match_fields};
use bulksend_model::{
    FieldDefinition, MappingProfile, MappingResult, PHONE_FIELD, ParamCounts, ParamKind,
};
use bulksend_transform::{
    MappingValidation, MessageTemplate, ParameterFormat, PreviewParams, TransformOptions,
    TransformResult, preview_message, transform_recipients, validate_mappings,
};
use serde::Serialize;
use tracing::{debug, info, info_span, trace, warn};

use crate::logging::redact_value;

/// Number of sample values shown per mapped column.
pub const SAMPLE_VALUES: usize = 3;

/// Result of the `map` stage.
#[derive(Debug, Clone, Serialize)]
pub struct MapReport {
    pub param_counts: ParamCounts,
    pub result: MappingResult,
    pub unused_columns: Vec<String>,
    /// Required fields that ended up without a column.
    pub missing_required: Vec<String>,
}

impl MapReport {
    /// Profile for `transform --mapping`.
    pub fn to_profile(&self, fields: &[FieldDefinition]) -> MappingProfile {
        let required = fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.key.clone())
            .collect();
        MappingProfile::new(self.result.mappings.clone(), self.param_counts)
            .with_required_fields(required)
    }
}

/// Result of the `transform` stage.
#[derive(Debug, Clone)]
pub struct TransformReport {
    pub validation: MappingValidation,
    /// `None` when pre-flight errors stopped the run.
    pub result: Option<TransformResult>,
}

impl TransformReport {
    /// True when the caller should exit with a failure status.
    pub fn has_errors(&self) -> bool {
        match &self.result {
            Some(result) => !self.validation.is_valid() || result.has_errors(),
            None => true,
        }
    }
}

pub fn load_csv(path: &Path) -> Result<CsvTable> {
    read_csv_table(path).with_context(|| format!("load csv: {}", path.display()))
}

pub fn load_template(path: &Path) -> Result<MessageTemplate> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read template: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse template: {}", path.display()))
}

pub fn load_profile(path: &Path) -> Result<MappingProfile> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read mapping: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse mapping: {}", path.display()))
}

/// Writes `value` as pretty JSON to `path`, or stdout when `path` is `None`.
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize json")?;
    match path {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "wrote json");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Parses `--custom` values: `city` or `city=Home town`.
pub fn parse_custom_fields(specs: &[String]) -> Result<Vec<FieldDefinition>> {
    specs
        .iter()
        .map(|spec| {
            let (key, label) = match spec.split_once('=') {
                Some((key, label)) => (key.trim(), label.trim()),
                None => (spec.trim(), spec.trim()),
            };
            if key.is_empty() {
                bail!("custom field needs a key: {spec:?}");
            }
            Ok(FieldDefinition::custom(key, label))
        })
        .collect()
}

/// Contact fields followed by the custom fields.
pub fn target_fields(custom: Vec<FieldDefinition>) -> Vec<FieldDefinition> {
    let mut fields = FieldDefinition::contact_fields();
    fields.extend(custom);
    fields
}

/// Runs the matcher over a loaded table.
pub fn run_matching(
    table: &CsvTable,
    fields: &[FieldDefinition],
    param_counts: ParamCounts,
    options: &MatchOptions,
) -> MapReport {
    let _span = info_span!("map", columns = table.headers.len(), rows = table.row_count()).entered();
    let result = match_fields(&table.headers, fields, param_counts, options);

    for (field, column) in &result.mappings {
        let samples: Vec<&str> = table
            .sample_values(column, SAMPLE_VALUES)
            .into_iter()
            .map(redact_value)
            .collect();
        trace!(field = %field, column = %column, samples = ?samples, "mapped column samples");
    }

    let unused_columns = result
        .unused_columns(&table.headers)
        .into_iter()
        .map(String::from)
        .collect();
    let missing_required = result
        .missing_required(fields)
        .into_iter()
        .map(|f| f.key.clone())
        .collect();

    MapReport {
        param_counts,
        result,
        unused_columns,
        missing_required,
    }
}

/// Fields a mapping must cover before transforming.
///
/// Uses the profile's list when it has one; otherwise phone plus every body
/// slot (when body values are validated).
pub fn required_fields(profile: &MappingProfile, options: &TransformOptions) -> Vec<String> {
    if !profile.required_fields.is_empty() {
        return profile.required_fields.clone();
    }
    let mut required = vec![PHONE_FIELD.to_string()];
    if options.validate_params {
        required.extend((0..profile.param_counts.body).map(|i| ParamKind::Body.slot_key(i)));
    }
    required
}

/// Pre-flight validation followed by the transformation.
///
/// Pre-flight errors stop the run before any row is read.
pub fn run_transform(
    table: &CsvTable,
    profile: &MappingProfile,
    options: &TransformOptions,
) -> TransformReport {
    let _span = info_span!("transform", rows = table.row_count()).entered();
    let required = required_fields(profile, options);
    let validation = validate_mappings(&profile.mappings, &table.headers, &required);

    for issue in validation.warnings() {
        warn!(%issue, "mapping warning");
    }
    if !validation.is_valid() {
        for issue in validation.errors() {
            warn!(%issue, "mapping error");
        }
        return TransformReport {
            validation,
            result: None,
        };
    }

    let result = transform_recipients(&table.rows, &profile.mappings, profile.param_counts, options);
    for error in &result.errors {
        let value = error.value.as_deref().map(redact_value);
        trace!(row = error.row, field = %error.field, value = ?value, "{}", error.message);
    }
    debug!(errors = result.errors.len(), "transform finished");

    TransformReport {
        validation,
        result: Some(result),
    }
}

/// Parses `NAME=VALUE` pairs for named previews.
pub fn parse_named_params(params: &[String]) -> Result<BTreeMap<String, String>> {
    params
        .iter()
        .map(|param| match param.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.to_string()))
            }
            _ => bail!("expected NAME=VALUE, got {param:?}"),
        })
        .collect()
}

/// Renders the header and body of `template`.
///
/// The parameter style follows the body text unless `force_named` is set.
pub fn render_preview(
    template: &MessageTemplate,
    params: &[String],
    force_named: bool,
) -> Result<String> {
    let named = force_named || template.parameter_format() == ParameterFormat::Named;
    let named_values;
    let preview_params = if named {
        named_values = parse_named_params(params)?;
        PreviewParams::Named(&named_values)
    } else {
        PreviewParams::Positional(params)
    };

    let mut text = String::new();
    if let Some(header) = template.header.as_deref().filter(|h| !h.trim().is_empty()) {
        text.push_str(&preview_message(header, preview_params));
        text.push_str("\n\n");
    }
    text.push_str(&preview_message(&template.body, preview_params));
    Ok(text)
}
