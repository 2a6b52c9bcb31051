//! Column scoring for field matching.
//!
//! Four strategies are tried from strongest to weakest; each yields a fixed
//! score except fuzzy matching, which scales with Levenshtein similarity.

use std::cmp::Ordering;

use bulksend_model::FieldDefinition;
use rapidfuzz::distance::levenshtein;
use serde::{Deserialize, Serialize};

use crate::patterns::matches_alias;
use crate::utils::{fold_case, normalize_key};

/// Case-insensitive equality with key, label or base key.
pub const EXACT_MATCH_SCORE: f64 = 1.0;
/// Equality after dropping separators.
pub const NORMALIZED_MATCH_SCORE: f64 = 0.95;
/// Header is a known alias of the base key.
pub const ALIAS_MATCH_SCORE: f64 = 0.9;
/// Fuzzy matches count only above this similarity.
pub const FUZZY_SIMILARITY_MIN: f64 = 0.7;
/// Fuzzy similarity is scaled by this weight.
pub const FUZZY_MATCH_WEIGHT: f64 = 0.8;

/// Strategy that produced a column score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStrategy {
    Exact,
    Normalized,
    Alias,
    Fuzzy,
}

impl MatchStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Normalized => "normalized",
            Self::Alias => "alias",
            Self::Fuzzy => "fuzzy",
        }
    }
}

/// Best score of one column for one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnScore {
    pub score: f64,
    pub strategy: MatchStrategy,
}

/// Levenshtein similarity `1 - distance / max(len)` of two strings.
///
/// Returns 0.0 when both are empty.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    let distance = levenshtein::distance(a.chars(), b.chars());
    1.0 - distance as f64 / max_len as f64
}

/// Scores a single header against a field.
///
/// Returns `None` if no strategy matched.
pub fn score_column(header: &str, field: &FieldDefinition, allow_fuzzy: bool) -> Option<ColumnScore> {
    let candidates = [field.key.as_str(), field.label.as_str(), field.base_key()];

    let folded = fold_case(header);
    if candidates.iter().any(|c| fold_case(c) == folded) {
        return Some(ColumnScore {
            score: EXACT_MATCH_SCORE,
            strategy: MatchStrategy::Exact,
        });
    }

    let normalized = normalize_key(header);
    if !normalized.is_empty() && candidates.iter().any(|c| normalize_key(c) == normalized) {
        return Some(ColumnScore {
            score: NORMALIZED_MATCH_SCORE,
            strategy: MatchStrategy::Normalized,
        });
    }

    if !normalized.is_empty() && matches_alias(&normalized, field.base_key()) {
        return Some(ColumnScore {
            score: ALIAS_MATCH_SCORE,
            strategy: MatchStrategy::Alias,
        });
    }

    if !allow_fuzzy {
        return None;
    }
    let best = candidates
        .iter()
        .map(|c| similarity(&normalized, &normalize_key(c)))
        .fold(0.0_f64, f64::max);
    (best > FUZZY_SIMILARITY_MIN).then(|| ColumnScore {
        score: best * FUZZY_MATCH_WEIGHT,
        strategy: MatchStrategy::Fuzzy,
    })
}

/// Scores every header for a field, best first.
///
/// Headers that match nothing are left out. Equal scores keep header order,
/// which is useful for sorting a column dropdown in a review UI.
pub fn rank_columns(
    field: &FieldDefinition,
    headers: &[String],
    allow_fuzzy: bool,
) -> Vec<(String, ColumnScore)> {
    let mut scores: Vec<_> = headers
        .iter()
        .filter_map(|h| score_column(h, field, allow_fuzzy).map(|score| (h.clone(), score)))
        .collect();
    scores.sort_by(|a, b| b.1.score.partial_cmp(&a.1.score).unwrap_or(Ordering::Equal));
    scores
}
