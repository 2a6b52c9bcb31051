//! Human-readable message previews.

use std::collections::BTreeMap;

use regex::Captures;

use crate::template::PLACEHOLDER_REGEX;

/// Parameter values for a preview.
#[derive(Debug, Clone, Copy)]
pub enum PreviewParams<'a> {
    /// Values for `{{1}}`, `{{2}}`, ... in order.
    Positional(&'a [String]),
    /// Values for `{{name}}` placeholders by name.
    Named(&'a BTreeMap<String, String>),
}

impl PreviewParams<'_> {
    fn lookup(&self, key: &str) -> Option<&str> {
        let value = match self {
            Self::Positional(values) => {
                let index: usize = key.parse().ok()?;
                values.get(index.checked_sub(1)?)?
            }
            Self::Named(values) => values.get(key)?,
        };
        let value = value.trim();
        (!value.is_empty()).then_some(value)
    }

    fn missing_marker(&self, key: &str) -> String {
        match self {
            Self::Positional(_) => format!("[param_{key}]"),
            Self::Named(_) => format!("[{key}]"),
        }
    }
}

/// Substitutes placeholders in `template` for display.
///
/// Missing or blank values stay visible as `[param_n]` (positional) or
/// `[name]` (named). Positional previews leave named placeholders untouched.
/// Only meant for showing a sample message, not for building send payloads.
pub fn preview_message(template: &str, params: PreviewParams<'_>) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures<'_>| {
            let key = &caps[1];
            if matches!(params, PreviewParams::Positional(_))
                && !key.bytes().all(|b| b.is_ascii_digit())
            {
                return caps[0].to_string();
            }
            match params.lookup(key) {
                Some(value) => value.to_string(),
                None => params.missing_marker(key),
            }
        })
        .into_owned()
}
