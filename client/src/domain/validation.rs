//! Field validation rules for application form input.
//!
//! Rules are pure predicates over raw strings; reformatting input is a
//! separate concern handled by [`format_national_id`] and must never make
//! invalid input pass a rule silently.

use std::sync::OnceLock;

use regex::Regex;

/// Number of digits in a National Identification Number.
pub const NATIONAL_ID_LENGTH: usize = 11;
/// Minimum trimmed length for an applicant's full name.
pub const FULL_NAME_MIN: usize = 3;

static NATIONAL_ID_RE: OnceLock<Regex> = OnceLock::new();

fn national_id_regex() -> &'static Regex {
    NATIONAL_ID_RE.get_or_init(|| {
        let pattern = format!("^[0-9]{{{NATIONAL_ID_LENGTH}}}$");
        Regex::new(&pattern)
            .unwrap_or_else(|error| panic!("national id regex failed to compile: {error}"))
    })
}

/// Required-field rule: the value is non-empty once trimmed.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// National-ID rule: exactly eleven decimal digits, nothing else.
pub fn is_valid_national_id(value: &str) -> bool {
    national_id_regex().is_match(value)
}

/// Name-length rule: trimmed length of at least three characters.
pub fn is_valid_full_name(value: &str) -> bool {
    value.trim().chars().count() >= FULL_NAME_MIN
}

/// Strip non-digit characters and truncate to the identifier length.
///
/// This mirrors what an input mask does as the user types; it does not
/// validate. Short inputs come back short and still fail
/// [`is_valid_national_id`].
///
/// # Examples
/// ```
/// use client::domain::validation::format_national_id;
///
/// assert_eq!(format_national_id("123-456-789 01234"), "12345678901");
/// assert_eq!(format_national_id("12ab3"), "123");
/// ```
pub fn format_national_id(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_digit)
        .take(NATIONAL_ID_LENGTH)
        .collect()
}
