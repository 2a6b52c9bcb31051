//! Alias tables and slot heuristics.

use crate::utils::normalize_key;

/// Known spellings of the core contact fields, keyed by base key.
pub const FIELD_ALIASES: &[(&str, &[&str])] = &[
    (
        "phone",
        &[
            "mobile",
            "telephone",
            "tel",
            "cell",
            "phone_number",
            "phonenumber",
            "contact",
            "numero",
        ],
    ),
    (
        "fullname",
        &[
            "name",
            "full_name",
            "customer_name",
            "contact_name",
            "displayname",
            "nom",
            "client",
            "prenom",
        ],
    ),
    (
        "email",
        &["mail", "e-mail", "email_address", "emailaddress", "courriel"],
    ),
];

/// Header fragments that suggest a personalised body parameter.
const BODY_NAME_PATTERNS: &[&str] = &["name", "nom", "prenom", "firstname"];
/// Extra fragments for the first body parameter (usually a greeting).
const BODY_FIRST_SLOT_PATTERNS: &[&str] = &["customer", "client"];
/// Extra fragments for the second body parameter (usually a reference).
const BODY_SECOND_SLOT_PATTERNS: &[&str] = &["order", "commande", "numero"];

/// Header fragments that suggest a button URL parameter.
pub const BUTTON_PATTERNS: &[&str] = &["url", "link", "lien", "tracking", "suivi", "http"];

/// Aliases registered for a base key.
pub fn aliases_for(base_key: &str) -> &'static [&'static str] {
    let base = normalize_key(base_key);
    FIELD_ALIASES
        .iter()
        .find(|(key, _)| *key == base)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// True if the normalized header equals one of the base key's aliases.
pub fn matches_alias(normalized_header: &str, base_key: &str) -> bool {
    aliases_for(base_key)
        .iter()
        .any(|alias| normalize_key(alias) == normalized_header)
}

/// Header fragments tried for body parameter `index` (0-based).
pub fn body_patterns(index: usize) -> Vec<String> {
    let mut patterns: Vec<String> = BODY_NAME_PATTERNS.iter().copied().map(String::from).collect();
    match index {
        0 => patterns.extend(BODY_FIRST_SLOT_PATTERNS.iter().copied().map(String::from)),
        1 => patterns.extend(BODY_SECOND_SLOT_PATTERNS.iter().copied().map(String::from)),
        _ => {}
    }
    let ordinal = index + 1;
    patterns.push(format!("param{ordinal}"));
    patterns.push(format!("body{ordinal}"));
    patterns
}

/// Position of the first header whose normalized form contains a pattern.
pub fn find_by_patterns<S: AsRef<str>>(headers: &[&str], patterns: &[S]) -> Option<usize> {
    headers.iter().position(|header| {
        let normalized = normalize_key(header);
        patterns
            .iter()
            .any(|pattern| normalized.contains(pattern.as_ref()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_lookup_uses_normalized_forms() {
        assert!(matches_alias("phonenumber", "phone"));
        assert!(matches_alias("email", "email"));
        assert!(matches_alias("emailaddress", "email"));
        assert!(!matches_alias("mobile", "email"));
        assert!(aliases_for("city").is_empty());
    }

    #[test]
    fn body_patterns_depend_on_slot() {
        let first = body_patterns(0);
        assert!(first.contains(&"customer".to_string()));
        assert!(first.contains(&"param1".to_string()));
        assert!(!first.contains(&"order".to_string()));

        let second = body_patterns(1);
        assert!(second.contains(&"commande".to_string()));
        assert!(second.contains(&"body2".to_string()));

        let third = body_patterns(2);
        assert_eq!(third.last().map(String::as_str), Some("body3"));
        assert!(!third.contains(&"client".to_string()));
    }

    #[test]
    fn finds_first_matching_header() {
        let headers = ["Amount", "Tracking Link", "Website URL"];
        assert_eq!(find_by_patterns(&headers, BUTTON_PATTERNS), Some(1));
        assert_eq!(find_by_patterns(&headers[..1], BUTTON_PATTERNS), None);
    }
}
