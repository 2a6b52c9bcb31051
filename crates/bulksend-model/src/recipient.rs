//! Recipient records, row validation errors, and the send payload.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::ParamKind;

/// One CSV data record: column header -> raw cell text.
pub type CsvRow = BTreeMap<String, String>;

/// Positional parameter values for one message.
///
/// Each list always has exactly as many entries as the template has slots of
/// that kind; missing values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub header_params: Vec<String>,
    pub body_params: Vec<String>,
    pub button_params: Vec<String>,
}

impl TemplateParams {
    /// Values for one parameter kind.
    pub fn get(&self, kind: ParamKind) -> &[String] {
        match kind {
            ParamKind::Header => &self.header_params,
            ParamKind::Body => &self.body_params,
            ParamKind::Button => &self.button_params,
        }
    }

    /// Mutable values for one parameter kind.
    pub fn get_mut(&mut self, kind: ParamKind) -> &mut Vec<String> {
        match kind {
            ParamKind::Header => &mut self.header_params,
            ParamKind::Body => &mut self.body_params,
            ParamKind::Button => &mut self.button_params,
        }
    }
}

/// A send-ready broadcast recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientRecord {
    /// Phone number, `+`-prefixed when enough digits were present.
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub template_params: TemplateParams,
}

/// A problem found in one input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// 1-based position of the row in the input.
    pub row: usize,
    /// Field key the problem belongs to.
    pub field: String,
    pub message: String,
    /// Offending value, when there was one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(row: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, {}: {}", self.row, self.field, self.message)?;
        if let Some(value) = &self.value {
            write!(f, " ({value})")?;
        }
        Ok(())
    }
}

/// Body of a broadcast-send request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    pub recipients: Vec<RecipientRecord>,
}

impl BroadcastPayload {
    pub fn new(template_id: Option<String>, recipients: Vec<RecipientRecord>) -> Self {
        Self {
            template_id,
            recipients,
        }
    }
}
