//! Korean phone number formatting and validation.

use regex::Regex;
use std::sync::LazyLock;

/// Maximum number of digits kept by [`format_phone_number`].
pub const MAX_PHONE_DIGITS: usize = 11;

// Mobile: 010, 011, 016-019 followed by 7 or 8 digits.
static MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^01[016789]\d{7,8}$").expect("mobile pattern is valid"));

// Landline: Seoul (02) or a regional area code followed by 7 or 8 digits.
static LANDLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0(?:2|3[1-9]|4[1-4]|5[1-5]|6[1-4])\d{7,8}$").expect("landline pattern is valid")
});

/// Format raw input as `NNN-NNNN-NNNN`.
///
/// Non-digits are dropped first, so already hyphenated input passes through
/// unchanged. Partial input gets partial formatting (`010`, `010-12`) and
/// anything past eleven digits is cut off.
pub fn format_phone_number(value: &str) -> String {
    let digits: String = unformat_phone_number(value)
        .chars()
        .take(MAX_PHONE_DIGITS)
        .collect();

    match digits.len() {
        0..=3 => digits,
        4..=7 => format!("{}-{}", &digits[..3], &digits[3..]),
        _ => format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..]),
    }
}

/// Strip everything except ASCII digits.
pub fn unformat_phone_number(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Whether the input is a Korean mobile or landline number.
pub fn is_valid_phone_number(value: &str) -> bool {
    let digits = unformat_phone_number(value);
    MOBILE.is_match(&digits) || LANDLINE.is_match(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mobile_numbers() {
        assert_eq!(format_phone_number("01012345678"), "010-1234-5678");
        assert_eq!(format_phone_number("01011112222"), "010-1111-2222");
    }

    #[test]
    fn test_format_partial_input() {
        assert_eq!(format_phone_number("010"), "010");
        assert_eq!(format_phone_number("01012"), "010-12");
        assert_eq!(format_phone_number("0101234"), "010-1234");
        assert_eq!(format_phone_number("01012345"), "010-1234-5");
    }

    #[test]
    fn test_format_truncates_to_eleven_digits() {
        assert_eq!(format_phone_number("010123456789999"), "010-1234-5678");
    }

    #[test]
    fn test_format_strips_separators() {
        assert_eq!(format_phone_number("010-1234-5678"), "010-1234-5678");
        assert_eq!(format_phone_number("010 1234 5678"), "010-1234-5678");
        assert_eq!(format_phone_number("010.1234.5678"), "010-1234-5678");
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_phone_number(""), "");
    }

    #[test]
    fn test_unformat() {
        assert_eq!(unformat_phone_number("010-1234-5678"), "01012345678");
        assert_eq!(unformat_phone_number("010 1234 5678"), "01012345678");
        assert_eq!(unformat_phone_number("01012345678"), "01012345678");
        assert_eq!(unformat_phone_number(""), "");
    }

    #[test]
    fn test_valid_mobile_prefixes() {
        assert!(is_valid_phone_number("010-1234-5678"));
        assert!(is_valid_phone_number("01012345678"));
        assert!(is_valid_phone_number("010-123-5678"));
        assert!(is_valid_phone_number("011-1234-5678"));
        for prefix in ["016", "017", "018", "019"] {
            assert!(is_valid_phone_number(&format!("{}-1234-5678", prefix)));
        }
    }

    #[test]
    fn test_valid_landlines() {
        assert!(is_valid_phone_number("02-1234-5678"));
        assert!(is_valid_phone_number("021234567"));
        assert!(is_valid_phone_number("031-1234-5678"));
        assert!(is_valid_phone_number("051-1234-5678"));
        assert!(is_valid_phone_number("064-1234-5678"));
    }

    #[test]
    fn test_invalid_prefix() {
        assert!(!is_valid_phone_number("020-1234-5678"));
        assert!(!is_valid_phone_number("015-1234-5678"));
    }

    #[test]
    fn test_invalid_length() {
        assert!(!is_valid_phone_number("010-123-456"));
        assert!(!is_valid_phone_number("010-1234-56789"));
    }

    #[test]
    fn test_invalid_empty_and_non_numeric() {
        assert!(!is_valid_phone_number(""));
        assert!(!is_valid_phone_number("abc-defg-hijk"));
    }
}
