//! Field validation primitives.
//!
//! These back the `validator` derives on the request types: each check is
//! a plain function so it can be unit-tested without building a request.
//! All failures are field-level and recoverable.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

static ISBN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{13}$").unwrap());

// Syntactic shape only: local@domain.tld, no whitespace. Deliverability
// is not checked here.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// An ISBN is accepted iff it is exactly 13 ASCII digits.
pub fn is_valid_isbn(value: &str) -> bool {
    ISBN_RE.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// True when the value is empty after trimming surrounding whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Normalize a phone number for display.
///
/// Strips every non-digit character; with at least 10 digits the first
/// ten are formatted as `(AAA) BBB-CCCC`. Shorter inputs are passed
/// through unchanged rather than rejected.
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 10 {
        return input.to_string();
    }
    format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10])
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn validate_isbn(value: &str) -> Result<(), ValidationError> {
    if is_valid_isbn(value) {
        Ok(())
    } else {
        Err(field_error("isbn", "ISBN must be exactly 13 digits"))
    }
}

pub fn validate_email_shape(value: &str) -> Result<(), ValidationError> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(field_error("email", "Invalid email address"))
    }
}

/// Required-field check: non-empty after trimming.
pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        Err(field_error("required", "This field is required"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isbn_accepts_exactly_13_digits() {
        assert!(is_valid_isbn("1234567890123"));
        assert!(is_valid_isbn("9780000000000"));
    }

    #[test]
    fn isbn_rejects_wrong_lengths_and_characters() {
        assert!(!is_valid_isbn("123456789012")); // 12
        assert!(!is_valid_isbn("12345678901234")); // 14
        assert!(!is_valid_isbn("123-456-78901"));
        assert!(!is_valid_isbn("123456789012X"));
        assert!(!is_valid_isbn(""));
        assert!(!is_valid_isbn(" 1234567890123"));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("reader@example.com"));
        assert!(is_valid_email("first.last@lib.example.org"));
        assert!(!is_valid_email("reader@example"));
        assert!(!is_valid_email("reader @example.com"));
        assert!(!is_valid_email("reader@ example.com"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn phone_formats_ten_digits() {
        assert_eq!(format_phone("1234567890"), "(123) 456-7890");
    }

    #[test]
    fn phone_strips_punctuation_first() {
        assert_eq!(format_phone("123-456-7890"), "(123) 456-7890");
        assert_eq!(format_phone("(123) 456.7890 ext 9"), "(123) 456-7890");
    }

    #[test]
    fn phone_passes_short_input_through() {
        assert_eq!(format_phone("123"), "123");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn required_rejects_whitespace_only() {
        assert!(validate_required("  \t ").is_err());
        assert!(validate_required("").is_err());
        assert!(validate_required("x").is_ok());
    }
}
