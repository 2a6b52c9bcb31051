//! CSV column-to-field mapping for broadcast imports.
//!
//! Proposes which CSV column feeds each contact field (`phone`, `fullname`,
//! `email`, `custom.*`) and each template parameter slot, with a confidence
//! score per mapping.
//!
//! # Strategies
//!
//! - **Exact**: case-insensitive equality with the field key, label or base key
//! - **Normalized**: equality once separators are dropped (`Phone Number` = `phone_number`)
//! - **Alias**: known spellings such as `mobile` or `courriel`
//! - **Fuzzy**: Levenshtein similarity over normalized names
//!
//! Template slots are then filled from leftover columns using header
//! patterns, falling back to column position.

mod engine;
mod patterns;
mod score;
mod utils;

pub use engine::{
    BODY_PATTERN_CONFIDENCE, BUTTON_PATTERN_CONFIDENCE, DEFAULT_MIN_CONFIDENCE, FieldMatcher,
    MatchOptions, POSITIONAL_SLOT_CONFIDENCE, match_fields,
};
pub use patterns::{FIELD_ALIASES, aliases_for};
pub use score::{
    ALIAS_MATCH_SCORE, ColumnScore, EXACT_MATCH_SCORE, FUZZY_MATCH_WEIGHT, FUZZY_SIMILARITY_MIN,
    MatchStrategy, NORMALIZED_MATCH_SCORE, rank_columns, score_column, similarity,
};
pub use utils::normalize_key;
