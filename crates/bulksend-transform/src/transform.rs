//! CSV row to recipient transformation.

use std::collections::BTreeMap;

use bulksend_model::{
    BroadcastPayload, CsvRow, EMAIL_FIELD, FULLNAME_FIELD, PHONE_FIELD, ParamCounts, ParamKind,
    RecipientRecord, TemplateParams, ValidationError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::fields::mapped_value;
use crate::phone::{format_phone_number, is_valid_phone_number};

/// Options for a transformation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Require a phone number in a recognised format.
    pub validate_phone: bool,
    /// Require every body parameter to have a value.
    pub validate_params: bool,
    /// Drop rows with errors instead of emitting a best-effort recipient.
    pub skip_invalid_rows: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            validate_phone: true,
            validate_params: true,
            skip_invalid_rows: false,
        }
    }
}

impl TransformOptions {
    #[must_use]
    pub fn with_validate_phone(mut self, enable: bool) -> Self {
        self.validate_phone = enable;
        self
    }

    #[must_use]
    pub fn with_validate_params(mut self, enable: bool) -> Self {
        self.validate_params = enable;
        self
    }

    #[must_use]
    pub fn with_skip_invalid_rows(mut self, enable: bool) -> Self {
        self.skip_invalid_rows = enable;
        self
    }
}

/// Output of a transformation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformResult {
    pub recipients: Vec<RecipientRecord>,
    /// Row problems in row order.
    pub errors: Vec<ValidationError>,
    /// Number of recipients produced.
    pub valid_count: usize,
    /// Rows that produced no recipient.
    ///
    /// Rows with errors still produce a recipient unless
    /// [`TransformOptions::skip_invalid_rows`] is set, so this is 0 in that
    /// case even when `errors` is not empty. Use [`Self::has_errors`] or
    /// [`Self::errors_for_row`] to find incomplete recipients.
    pub invalid_count: usize,
}

impl TransformResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors of one 1-based input row.
    pub fn errors_for_row(&self, row: usize) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |error| error.row == row)
    }

    /// Number of distinct rows with at least one error.
    pub fn rows_with_errors(&self) -> usize {
        let mut rows: Vec<usize> = self.errors.iter().map(|error| error.row).collect();
        rows.dedup();
        rows.len()
    }

    /// Wraps the recipients into a send payload.
    pub fn into_payload(self, template_id: Option<String>) -> BroadcastPayload {
        BroadcastPayload::new(template_id, self.recipients)
    }
}

/// Turns CSV rows into broadcast recipients under a confirmed mapping.
///
/// Rows are never rejected with an `Err`: every problem is reported as a
/// [`ValidationError`] in the result.
#[derive(Debug, Clone)]
pub struct RecipientTransformer<'a> {
    mappings: &'a BTreeMap<String, String>,
    param_counts: ParamCounts,
    options: TransformOptions,
}

impl<'a> RecipientTransformer<'a> {
    pub fn new(
        mappings: &'a BTreeMap<String, String>,
        param_counts: ParamCounts,
        options: TransformOptions,
    ) -> Self {
        Self {
            mappings,
            param_counts,
            options,
        }
    }

    pub fn transform(&self, rows: &[CsvRow]) -> TransformResult {
        let mut result = TransformResult::default();

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 1;
            let errors = self.validate_row(row, row_number);
            let has_errors = !errors.is_empty();
            if has_errors {
                debug!(row = row_number, error_count = errors.len(), "row has errors");
                result.errors.extend(errors);
                if self.options.skip_invalid_rows {
                    continue;
                }
            }
            result.recipients.push(self.build_recipient(row));
        }

        result.valid_count = result.recipients.len();
        result.invalid_count = rows.len() - result.recipients.len();
        info!(
            row_count = rows.len(),
            valid = result.valid_count,
            invalid = result.invalid_count,
            errors = result.errors.len(),
            skip_invalid_rows = self.options.skip_invalid_rows,
            "recipient transformation complete"
        );
        result
    }

    /// Errors for one row, in phone then body-parameter order.
    pub fn validate_row(&self, row: &CsvRow, row_number: usize) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.options.validate_phone {
            let phone = self.value(row, PHONE_FIELD);
            if phone.is_empty() {
                errors.push(ValidationError::new(
                    row_number,
                    PHONE_FIELD,
                    "Phone number is required",
                ));
            } else if !is_valid_phone_number(phone) {
                errors.push(
                    ValidationError::new(row_number, PHONE_FIELD, "Invalid phone number format")
                        .with_value(phone),
                );
            }
        }

        if self.options.validate_params {
            for index in 0..self.param_counts.body {
                let key = ParamKind::Body.slot_key(index);
                if self.value(row, &key).is_empty() {
                    errors.push(ValidationError::new(
                        row_number,
                        key,
                        format!("Body parameter {} is empty", index + 1),
                    ));
                }
            }
        }

        errors
    }

    /// Builds a recipient without validating.
    ///
    /// Parameter lists are always exactly as long as the template's slot
    /// counts; unmapped or blank slots become `""`.
    pub fn build_recipient(&self, row: &CsvRow) -> RecipientRecord {
        let optional = |field: &str| {
            let value = self.value(row, field);
            (!value.is_empty()).then(|| value.to_string())
        };

        let mut template_params = TemplateParams::default();
        for kind in ParamKind::ALL {
            *template_params.get_mut(kind) = (0..self.param_counts.count(kind))
                .map(|index| self.value(row, &kind.slot_key(index)).to_string())
                .collect();
        }

        RecipientRecord {
            phone: format_phone_number(self.value(row, PHONE_FIELD)),
            fullname: optional(FULLNAME_FIELD),
            email: optional(EMAIL_FIELD),
            template_params,
        }
    }

    fn value<'r>(&self, row: &'r CsvRow, field: &str) -> &'r str {
        mapped_value(row, self.mappings, field)
    }
}

/// Runs one transformation pass.
pub fn transform_recipients(
    rows: &[CsvRow],
    mappings: &BTreeMap<String, String>,
    param_counts: ParamCounts,
    options: &TransformOptions,
) -> TransformResult {
    RecipientTransformer::new(mappings, param_counts, *options).transform(rows)
}
