//! Lenient numeric parsing for delimited-text cells.
//!
//! Source files mix clean numbers, numbers with trailing units (`"4.2%"`) and
//! free text. Three entry points cover the cases the pipeline needs:
//!
//! - [`looks_numeric`]: the whole cell is a decimal literal (type coercion)
//! - [`parse_float`]: leading decimal literal, rest ignored
//! - [`parse_int`]: leading integer, rest ignored
//! - [`parse_year`]: leading integer that is a 4-digit year

use crate::error::{ModelError, Result};

/// Returns the byte length of the decimal literal at the start of `value`.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// exponent only when it is followed by at least one digit. Returns 0 when
/// no digit is present.
fn decimal_prefix_len(value: &str) -> usize {
    let bytes = value.as_bytes();
    let mut idx = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        idx += 1;
    }
    let int_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    let mut digits = idx - int_start;
    if idx < bytes.len() && bytes[idx] == b'.' {
        let frac_start = idx + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        digits += end - frac_start;
        if digits > 0 {
            idx = end;
        }
    }
    if digits == 0 {
        return 0;
    }
    if idx < bytes.len() && matches!(bytes[idx], b'e' | b'E') {
        let mut exp = idx + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let exp_digits_start = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > exp_digits_start {
            idx = exp;
        }
    }
    idx
}

/// Returns true if the trimmed cell is entirely a decimal literal.
///
/// A leading `+` is not accepted, so codes like `"+44"` stay text.
pub fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.starts_with('+') {
        return false;
    }
    decimal_prefix_len(trimmed) == trimmed.len()
}

/// Parses the leading decimal literal of a cell.
///
/// Leading whitespace is skipped and trailing text ignored, so `"4.2%"`
/// yields `4.2`. Returns `None` when the cell does not start with a number.
pub fn parse_float(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let len = decimal_prefix_len(trimmed);
    if len == 0 {
        return None;
    }
    trimmed[..len].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses the leading base-10 integer of a cell (`"2019"`, `"2019-01"`).
pub fn parse_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let bytes = trimmed.as_bytes();
    let mut idx = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        idx += 1;
    }
    let digits_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    if idx == digits_start {
        return None;
    }
    trimmed[..idx].parse().ok()
}

/// Returns true for 4-digit years.
pub fn is_year(year: i32) -> bool {
    (1000..=9999).contains(&year)
}

/// Parses the leading integer of year text and checks it is a 4-digit year.
///
/// # Errors
///
/// Returns [`ModelError::InvalidYear`] when there is no leading integer or it
/// is not a 4-digit year.
pub fn parse_year(value: &str) -> Result<i32> {
    parse_int(value)
        .and_then(|year| i32::try_from(year).ok())
        .filter(|year| is_year(*year))
        .ok_or_else(|| ModelError::InvalidYear(value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_numeric() {
        assert!(looks_numeric("123"));
        assert!(looks_numeric("-45.67"));
        assert!(looks_numeric(" 1.5e3 "));
        assert!(looks_numeric(".5"));
        assert!(looks_numeric("2."));
        assert!(!looks_numeric(""));
        assert!(!looks_numeric("abc"));
        assert!(!looks_numeric("4.2%"));
        assert!(!looks_numeric("+44"));
        assert!(!looks_numeric("inf"));
        assert!(!looks_numeric("NaN"));
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float("4.2"), Some(4.2));
        assert_eq!(parse_float("4.2%"), Some(4.2));
        assert_eq!(parse_float("  -0.5 units"), Some(-0.5));
        assert_eq!(parse_float("1e"), Some(1.0));
        assert_eq!(parse_float("1.5E-3"), Some(0.0015));
    }

    #[test]
    fn test_parse_float_invalid() {
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("abc"), None);
        assert_eq!(parse_float("."), None);
        assert_eq!(parse_float("-"), None);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("2019"), Some(2019));
        assert_eq!(parse_int(" 2019-01-01"), Some(2019));
        assert_eq!(parse_int("-7"), Some(-7));
        assert_eq!(parse_int("year"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2019"), Ok(2019));
        assert_eq!(parse_year(" 2019-06"), Ok(2019));
        assert_eq!(
            parse_year("19"),
            Err(ModelError::InvalidYear("19".to_string()))
        );
        assert!(parse_year("").is_err());
        assert!(parse_year("next year").is_err());
        assert!(!is_year(0));
    }
}
