//! Field-to-column mapping results.
//!
//! A [`MappingResult`] is what the field matcher proposes and what the
//! import wizard lets the user edit before handing the final column map to
//! the recipient transformer.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{MappingError, Result};
use crate::field::{FieldDefinition, ParamCounts};

/// Confidence recorded for mappings chosen by hand.
pub const MANUAL_CONFIDENCE: f64 = 1.0;

/// A candidate column that scored below the confidence cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Target field key.
    pub target: String,
    /// CSV column that was considered.
    pub column: String,
    /// Score in `0.0..1.0`.
    pub score: f64,
}

/// Proposed mapping from field keys to CSV columns.
///
/// Every key in `mappings` has an entry in `confidence`. The matcher never
/// assigns a column to two fields; [`MappingResult::set_manual`] may.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingResult {
    /// Field key -> CSV column.
    pub mappings: BTreeMap<String, String>,
    /// Field key -> confidence in `0.0..=1.0`.
    pub confidence: BTreeMap<String, f64>,
    /// Low-confidence candidates, in the order they were found.
    pub suggestions: Vec<Suggestion>,
}

impl MappingResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a mapping together with its confidence.
    pub fn insert(&mut self, field: impl Into<String>, column: impl Into<String>, confidence: f64) {
        let field = field.into();
        self.confidence.insert(field.clone(), confidence);
        self.mappings.insert(field, column.into());
    }

    /// Records a low-confidence candidate.
    pub fn suggest(&mut self, target: impl Into<String>, column: impl Into<String>, score: f64) {
        self.suggestions.push(Suggestion {
            target: target.into(),
            column: column.into(),
            score,
        });
    }

    /// Column mapped to a field.
    pub fn column_for(&self, field: &str) -> Option<&str> {
        self.mappings.get(field).map(String::as_str)
    }

    /// Confidence of a field's mapping.
    pub fn confidence_for(&self, field: &str) -> Option<f64> {
        self.confidence.get(field).copied()
    }

    /// Suggestions recorded for a field.
    pub fn suggestions_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Suggestion> {
        self.suggestions.iter().filter(move |s| s.target == field)
    }

    /// True if some field is mapped to the column.
    pub fn is_column_used(&self, column: &str) -> bool {
        self.mappings.values().any(|c| c == column)
    }

    pub fn is_mapped(&self, field: &str) -> bool {
        self.mappings.contains_key(field)
    }

    /// Maps a field by hand, overriding whatever the matcher chose.
    ///
    /// The column must exist in `headers`. Any suggestions for the field are
    /// dropped since the user has made a decision.
    pub fn set_manual(&mut self, field: &str, column: &str, headers: &[String]) -> Result<()> {
        if field.trim().is_empty() {
            return Err(MappingError::EmptyFieldKey);
        }
        if !headers.iter().any(|h| h == column) {
            return Err(MappingError::ColumnNotFound(column.to_string()));
        }
        self.suggestions.retain(|s| s.target != field);
        self.insert(field, column, MANUAL_CONFIDENCE);
        Ok(())
    }

    /// Removes a field's mapping, returning the column it pointed at.
    pub fn clear(&mut self, field: &str) -> Result<String> {
        self.confidence.remove(field);
        self.mappings
            .remove(field)
            .ok_or_else(|| MappingError::FieldNotMapped(field.to_string()))
    }

    /// Fields with no mapping, in definition order.
    pub fn unmapped_fields<'a>(&self, fields: &'a [FieldDefinition]) -> Vec<&'a FieldDefinition> {
        fields
            .iter()
            .filter(|field| !self.mappings.contains_key(&field.key))
            .collect()
    }

    /// Required fields with no mapping.
    pub fn missing_required<'a>(&self, fields: &'a [FieldDefinition]) -> Vec<&'a FieldDefinition> {
        self.unmapped_fields(fields)
            .into_iter()
            .filter(|field| field.required)
            .collect()
    }

    /// Headers that no field is mapped to, in header order.
    pub fn unused_columns<'a>(&self, headers: &'a [String]) -> Vec<&'a str> {
        let used: BTreeSet<&str> = self.mappings.values().map(String::as_str).collect();
        headers
            .iter()
            .map(String::as_str)
            .filter(|h| !used.contains(h))
            .collect()
    }

    /// Confidence level of a field's mapping with default thresholds.
    pub fn confidence_level(&self, field: &str) -> Option<ConfidenceLevel> {
        self.confidence_for(field)
            .and_then(|score| ConfidenceThresholds::default().categorize(score))
    }

    /// Returns the count of mappings at each confidence level.
    ///
    /// Uses default thresholds. For custom thresholds, use [`Self::count_by_level_with`].
    #[must_use]
    pub fn count_by_level(&self) -> BTreeMap<ConfidenceLevel, usize> {
        self.count_by_level_with(&ConfidenceThresholds::default())
    }

    /// Returns the count of mappings at each confidence level using custom thresholds.
    #[must_use]
    pub fn count_by_level_with(
        &self,
        thresholds: &ConfidenceThresholds,
    ) -> BTreeMap<ConfidenceLevel, usize> {
        let mut counts = BTreeMap::new();
        for score in self.confidence.values() {
            if let Some(level) = thresholds.categorize(*score) {
                *counts.entry(level).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Consumes the result, keeping only the field -> column map.
    pub fn into_column_map(self) -> BTreeMap<String, String> {
        self.mappings
    }
}

/// Confidence level categories for badging mappings in a review UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    /// Positional guesses and weak matches; needs verification.
    Low,
    /// Alias or fuzzy matches; should be reviewed.
    Medium,
    /// Exact or normalized matches.
    High,
}

impl ConfidenceLevel {
    /// Returns a human-readable description of the confidence level.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely correct",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Boundaries between confidence levels.
///
/// - Below `low`: not categorized
/// - `low` to `medium`: [`ConfidenceLevel::Low`]
/// - `medium` to `high`: [`ConfidenceLevel::Medium`]
/// - At or above `high`: [`ConfidenceLevel::High`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceThresholds {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.95,
            medium: 0.80,
            low: 0.50,
        }
    }
}

impl ConfidenceThresholds {
    /// Categorizes a confidence score; `None` below the low threshold.
    #[must_use]
    pub fn categorize(&self, confidence: f64) -> Option<ConfidenceLevel> {
        if confidence >= self.high {
            Some(ConfidenceLevel::High)
        } else if confidence >= self.medium {
            Some(ConfidenceLevel::Medium)
        } else if confidence >= self.low {
            Some(ConfidenceLevel::Low)
        } else {
            None
        }
    }
}

/// A confirmed mapping as saved by the import wizard and read by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingProfile {
    /// Field key -> CSV column.
    pub mappings: BTreeMap<String, String>,
    /// Template parameter slots to fill.
    #[serde(default)]
    pub param_counts: ParamCounts,
    /// Fields the pre-flight check must find mapped.
    #[serde(default)]
    pub required_fields: Vec<String>,
}

impl MappingProfile {
    pub fn new(mappings: BTreeMap<String, String>, param_counts: ParamCounts) -> Self {
        Self {
            mappings,
            param_counts,
            required_fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_required_fields(mut self, fields: Vec<String>) -> Self {
        self.required_fields = fields;
        self
    }
}
