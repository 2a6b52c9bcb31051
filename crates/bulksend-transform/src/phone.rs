//! Phone number checks and formatting.

use std::sync::LazyLock;

use regex::Regex;

/// `+` followed by 8 to 15 digits.
static E164_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[0-9]{8,15}$").expect("Invalid E.164 regex"));

/// 10 to 15 digits without a leading zero.
static BARE_DIGITS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]{9,14}$").expect("Invalid phone digits regex"));

/// Minimum digit count before `format_phone_number` adds a `+`.
pub const MIN_INTERNATIONAL_DIGITS: usize = 10;

/// Drops whitespace, hyphens, parentheses and dots.
pub fn strip_phone_separators(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace() && !matches!(ch, '-' | '(' | ')' | '.'))
        .collect()
}

/// True for E.164 numbers and for bare international numbers.
///
/// Local numbers with a leading zero (`0712345678`) are rejected unless
/// written with a `+` country prefix.
pub fn is_valid_phone_number(raw: &str) -> bool {
    let cleaned = strip_phone_separators(raw);
    E164_REGEX.is_match(&cleaned) || BARE_DIGITS_REGEX.is_match(&cleaned)
}

/// Strips separators and adds a `+` prefix when at least ten digits remain.
///
/// This does not validate; shorter or non-numeric input is returned cleaned
/// but otherwise unchanged.
pub fn format_phone_number(raw: &str) -> String {
    let cleaned = strip_phone_separators(raw);
    if cleaned.starts_with('+') {
        return cleaned;
    }
    let digits = cleaned.chars().filter(char::is_ascii_digit).count();
    if digits >= MIN_INTERNATIONAL_DIGITS {
        format!("+{cleaned}")
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_e164_numbers() {
        assert!(is_valid_phone_number("+254712345678"));
        assert!(is_valid_phone_number("+1 (415) 555-0100"));
        assert!(is_valid_phone_number("+33.6.12.34.56.78"));
    }

    #[test]
    fn accepts_bare_international_digits() {
        assert!(is_valid_phone_number("254712345678"));
        assert!(is_valid_phone_number("4155550100"));
    }

    #[test]
    fn rejects_leading_zero_without_prefix() {
        assert!(!is_valid_phone_number("0712345678"));
        assert!(is_valid_phone_number("+0712345678"));
    }

    #[test]
    fn rejects_short_and_malformed_numbers() {
        assert!(!is_valid_phone_number("12345"));
        assert!(!is_valid_phone_number("+1234567"));
        assert!(!is_valid_phone_number("+1234567890123456"));
        assert!(!is_valid_phone_number("phone"));
        assert!(!is_valid_phone_number(""));
        assert!(!is_valid_phone_number("+25471234567x"));
    }

    #[test]
    fn formats_with_plus_prefix() {
        assert_eq!(format_phone_number("254 712-345-678"), "+254712345678");
        assert_eq!(format_phone_number("+254 (712) 345.678"), "+254712345678");
        assert_eq!(format_phone_number("0712345678"), "+0712345678");
    }

    #[test]
    fn short_numbers_are_only_cleaned() {
        assert_eq!(format_phone_number("123-45"), "12345");
        assert_eq!(format_phone_number(""), "");
    }
}
