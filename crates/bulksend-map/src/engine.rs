//! Mapping engine implementation.

use bulksend_model::{FieldDefinition, MappingResult, ParamCounts, ParamKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::patterns::{BUTTON_PATTERNS, body_patterns, find_by_patterns};
use crate::score::{ColumnScore, score_column};
use crate::utils::has_duplicate_headers;

/// Default cutoff below which a match is only suggested.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.7;
/// Confidence of a slot filled by header position alone.
pub const POSITIONAL_SLOT_CONFIDENCE: f64 = 0.5;
/// Confidence of a body slot filled by a header pattern.
pub const BODY_PATTERN_CONFIDENCE: f64 = 0.8;
/// Confidence of a button slot filled by a URL-like header.
pub const BUTTON_PATTERN_CONFIDENCE: f64 = 0.85;

/// Options for a matching pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Process required fields first so they get first pick of ambiguous columns.
    pub prioritize_required: bool,
    /// Enable Levenshtein-based fuzzy matching.
    pub allow_fuzzy_matching: bool,
    /// Matches below this score go to suggestions instead of mappings.
    pub min_confidence_score: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            prioritize_required: true,
            allow_fuzzy_matching: true,
            min_confidence_score: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl MatchOptions {
    /// Only exact, normalized and alias matches are committed.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            prioritize_required: true,
            allow_fuzzy_matching: false,
            min_confidence_score: 0.9,
        }
    }

    /// Commits weaker fuzzy matches too.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            min_confidence_score: 0.6,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_prioritize_required(mut self, enable: bool) -> Self {
        self.prioritize_required = enable;
        self
    }

    #[must_use]
    pub fn with_fuzzy_matching(mut self, enable: bool) -> Self {
        self.allow_fuzzy_matching = enable;
        self
    }

    #[must_use]
    pub fn with_min_confidence(mut self, score: f64) -> Self {
        self.min_confidence_score = score;
        self
    }
}

/// Engine for mapping CSV columns onto contact fields and template slots.
///
/// Matching is greedy per field: each field takes the best-scoring column
/// still available, and a committed column is removed from the pool so no
/// column satisfies two fields in one pass. Template slots are filled
/// afterwards from whatever columns are left.
///
/// # Example
///
/// ```ignore
/// use bulksend_map::{FieldMatcher, MatchOptions};
///
/// let matcher = FieldMatcher::new(MatchOptions::default());
/// let result = matcher.suggest(&headers, &fields, ParamCounts::new(0, 2, 1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldMatcher {
    options: MatchOptions,
}

impl FieldMatcher {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Proposes a mapping for `fields` and the template slots in `param_counts`.
    ///
    /// The result is fully determined by the order of `headers` and `fields`:
    /// ties go to the first header encountered.
    pub fn suggest(
        &self,
        headers: &[String],
        fields: &[FieldDefinition],
        param_counts: ParamCounts,
    ) -> MappingResult {
        if has_duplicate_headers(headers) {
            warn!(
                header_count = headers.len(),
                "duplicate CSV headers; each copy is matched independently"
            );
        }

        let mut result = MappingResult::new();
        let mut available: Vec<&str> = headers.iter().map(String::as_str).collect();

        for field in self.ordered_fields(fields) {
            if result.is_mapped(&field.key) {
                continue;
            }
            let Some((idx, best)) = self.best_column(field, &available) else {
                continue;
            };
            let column = available[idx];
            if best.score >= self.options.min_confidence_score {
                debug!(
                    field = %field.key,
                    column = %column,
                    score = best.score,
                    strategy = best.strategy.label(),
                    "mapped field"
                );
                result.insert(field.key.clone(), column, best.score);
                available.remove(idx);
            } else if best.score > 0.0 {
                debug!(
                    field = %field.key,
                    column = %column,
                    score = best.score,
                    "below confidence cutoff; suggesting"
                );
                result.suggest(field.key.clone(), column, best.score);
            }
        }

        fill_template_slots(&mut result, &mut available, param_counts);

        info!(
            header_count = headers.len(),
            field_count = fields.len(),
            slot_count = param_counts.total(),
            mapped = result.mappings.len(),
            suggestions = result.suggestions.len(),
            unused_columns = available.len(),
            "field matching complete"
        );
        result
    }

    fn ordered_fields<'a>(&self, fields: &'a [FieldDefinition]) -> Vec<&'a FieldDefinition> {
        let mut ordered: Vec<&FieldDefinition> = fields.iter().collect();
        if self.options.prioritize_required {
            // Stable: keeps caller order within required and optional groups.
            ordered.sort_by_key(|field| !field.required);
        }
        ordered
    }

    fn best_column(&self, field: &FieldDefinition, available: &[&str]) -> Option<(usize, ColumnScore)> {
        let mut best: Option<(usize, ColumnScore)> = None;
        for (idx, header) in available.iter().enumerate() {
            let Some(score) = score_column(header, field, self.options.allow_fuzzy_matching) else {
                continue;
            };
            if best.is_none_or(|(_, current)| score.score > current.score) {
                best = Some((idx, score));
            }
        }
        best
    }
}

/// Runs one matching pass with the given options.
pub fn match_fields(
    headers: &[String],
    fields: &[FieldDefinition],
    param_counts: ParamCounts,
    options: &MatchOptions,
) -> MappingResult {
    FieldMatcher::new(*options).suggest(headers, fields, param_counts)
}

/// Fills header, body and button slots from the remaining columns.
fn fill_template_slots(
    result: &mut MappingResult,
    available: &mut Vec<&str>,
    param_counts: ParamCounts,
) {
    for (kind, index) in param_counts.slots() {
        if available.is_empty() {
            break;
        }
        let key = kind.slot_key(index);
        if result.is_mapped(&key) {
            continue;
        }
        let matched = match kind {
            ParamKind::Header => None,
            ParamKind::Body => find_by_patterns(available, &body_patterns(index))
                .map(|idx| (idx, BODY_PATTERN_CONFIDENCE)),
            ParamKind::Button => find_by_patterns(available, BUTTON_PATTERNS)
                .map(|idx| (idx, BUTTON_PATTERN_CONFIDENCE)),
        };
        let (idx, confidence) = matched.unwrap_or((0, POSITIONAL_SLOT_CONFIDENCE));
        let column = available.remove(idx);
        debug!(slot = %key, column = %column, confidence, "filled template slot");
        result.insert(key, column, confidence);
    }
}
