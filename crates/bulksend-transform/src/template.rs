//! Placeholder parsing for message templates.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use bulksend_model::ParamCounts;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `{{1}}`, `{{ name }}`, ... with optional inner whitespace.
pub(crate) static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_.]+)\s*\}\}").expect("Invalid placeholder regex")
});

/// How a template addresses its parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterFormat {
    /// `{{1}}`, `{{2}}`, ...
    #[default]
    Positional,
    /// `{{first_name}}`, `{{order_id}}`, ...
    Named,
}

fn placeholder_keys(text: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn positional_index(key: &str) -> Option<usize> {
    if key.bytes().all(|b| b.is_ascii_digit()) {
        key.parse().ok()
    } else {
        None
    }
}

/// Distinct positional indices used in `text`, ascending.
pub fn placeholder_indices(text: &str) -> Vec<usize> {
    placeholder_keys(text)
        .filter_map(positional_index)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Number of positional slots `text` declares: its highest `{{n}}` index.
///
/// Gaps still count, so `"{{1}} and {{3}}"` declares three slots.
pub fn count_placeholders(text: &str) -> usize {
    placeholder_indices(text).last().copied().unwrap_or(0)
}

/// Distinct named placeholders in first-seen order.
pub fn named_placeholders(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for key in placeholder_keys(text) {
        if positional_index(key).is_none() && !names.iter().any(|n| n == key) {
            names.push(key.to_string());
        }
    }
    names
}

/// Named if any placeholder is not a plain number.
pub fn detect_parameter_format(text: &str) -> ParameterFormat {
    if placeholder_keys(text).any(|key| positional_index(key).is_none()) {
        ParameterFormat::Named
    } else {
        ParameterFormat::Positional
    }
}

/// Derives slot counts from a template's texts.
///
/// Each button carries at most one dynamic parameter, so the button count is
/// the number of button texts that contain a placeholder.
pub fn param_counts_from_template<S: AsRef<str>>(
    header: Option<&str>,
    body: &str,
    buttons: &[S],
) -> ParamCounts {
    ParamCounts {
        header: header.map_or(0, count_placeholders),
        body: count_placeholders(body),
        button: buttons
            .iter()
            .filter(|text| PLACEHOLDER_REGEX.is_match(text.as_ref()))
            .count(),
    }
}

/// A message template as stored in a template file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    pub body: String,
    /// Button texts or URLs, e.g. `https://shop.example/track/{{1}}`.
    #[serde(default)]
    pub buttons: Vec<String>,
}

impl MessageTemplate {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn param_counts(&self) -> ParamCounts {
        param_counts_from_template(self.header.as_deref(), &self.body, &self.buttons)
    }

    /// Format of the body text.
    pub fn parameter_format(&self) -> ParameterFormat {
        detect_parameter_format(&self.body)
    }
}
