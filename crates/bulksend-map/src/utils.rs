//! Utility functions for mapping operations.

/// Lowercases and drops every non-alphanumeric character.
///
/// `"Phone Number"`, `"phone_number"` and `"PHONE-NUMBER"` all become
/// `"phonenumber"`.
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Trims and lowercases, keeping separators.
pub fn fold_case(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Returns true if any header appears more than once.
pub fn has_duplicate_headers(headers: &[String]) -> bool {
    let mut seen = std::collections::BTreeSet::new();
    headers.iter().any(|h| !seen.insert(h.as_str()))
}
