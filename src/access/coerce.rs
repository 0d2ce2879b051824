//! Scalar coercion rules shared by the typed getters.

use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::Value;

/// Coerces a value to a finite number.
///
/// Strings containing a `.` are parsed as floats, all other strings as
/// integers. Anything that is not a finite number afterwards yields `None`.
pub(crate) fn to_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => *n,
        Value::String(s) if s.contains('.') => parse_float(s),
        Value::String(s) => parse_integer(s),
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Parses the longest leading decimal or `0x` hexadecimal integer.
///
/// Leading whitespace is skipped and trailing garbage ignored, so `"12px"`
/// yields 12. Returns NaN when no digit is found.
fn parse_integer(s: &str) -> f64 {
    let s = s.trim_start();
    let (negative, s) = split_sign(s);

    let (radix, digits) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(rest) => (16, rest),
        None => (10, s),
    };

    let mut result = 0.0_f64;
    let mut seen = false;
    for d in digits.chars().map_while(|c| c.to_digit(radix)) {
        result = result * f64::from(radix) + f64::from(d);
        seen = true;
    }

    if !seen {
        return f64::NAN;
    }
    if negative {
        -result
    } else {
        result
    }
}

/// Parses the longest leading decimal float, with optional exponent.
///
/// Returns NaN when no digit is found; `"Infinity"` yields an infinite value.
fn parse_float(s: &str) -> f64 {
    let s = s.trim_start();
    let (negative, unsigned) = split_sign(s);
    if unsigned.starts_with("Infinity") {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let bytes = unsigned.as_bytes();
    let mut end = 0;
    let mut digits = 0;

    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let parsed = unsigned[..end].parse::<f64>().unwrap_or(f64::NAN);
    if negative {
        -parsed
    } else {
        parsed
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    }
}

/// Truthiness: null, `false`, zero, NaN and the empty string are false.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Date(_) | Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerces a value to a date.
///
/// Dates pass through untouched. Strings must parse to an instant after the
/// Unix epoch; numbers are milliseconds since the epoch and must be finite
/// and strictly positive.
pub(crate) fn to_date(value: &Value) -> Option<OffsetDateTime> {
    match value {
        Value::Date(dt) => Some(*dt),
        // Sub-millisecond precision does not count toward the positive check
        Value::String(s) => {
            parse_date(s).filter(|dt| dt.unix_timestamp_nanos() / 1_000_000 > 0)
        }
        Value::Number(n) if n.is_finite() && *n > 0.0 => from_millis(*n),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn from_millis(millis: f64) -> Option<OffsetDateTime> {
    // Fractional milliseconds truncate toward zero
    let nanos = i128::from(millis.trunc() as i64) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
}

/// Parses a calendar date-time string.
///
/// Accepts RFC 3339, RFC 2822, a bare `YYYY-MM-DD` date, and a date with
/// a time but no offset. Values without an offset are taken as UTC.
fn parse_date(s: &str) -> Option<OffsetDateTime> {
    let s = s.trim();

    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(dt);
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc2822) {
        return Some(dt);
    }
    if let Ok(date) = Date::parse(s, format_description!("[year]-[month]-[day]")) {
        return Some(date.midnight().assume_utc());
    }

    let local = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
        ),
        format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
        ),
    ];
    local
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(s, *format).ok())
        .map(PrimitiveDateTime::assume_utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_strings() {
        assert_eq!(to_number(&Value::from("42")), Some(42.0));
        assert_eq!(to_number(&Value::from("  -7")), Some(-7.0));
        assert_eq!(to_number(&Value::from("12px")), Some(12.0));
        assert_eq!(to_number(&Value::from("0x1F")), Some(31.0));
        // No '.' means integer parsing, so the exponent is ignored
        assert_eq!(to_number(&Value::from("1e3")), Some(1.0));
    }

    #[test]
    fn test_float_strings() {
        assert_eq!(to_number(&Value::from("2.75")), Some(2.75));
        assert_eq!(to_number(&Value::from(".5")), Some(0.5));
        assert_eq!(to_number(&Value::from("-2.5e2")), Some(-250.0));
        assert_eq!(to_number(&Value::from("1.5e")), Some(1.5));
        assert_eq!(to_number(&Value::from("7.25 units")), Some(7.25));
    }

    #[test]
    fn test_non_numeric_strings_rejected() {
        assert_eq!(to_number(&Value::from("abc")), None);
        assert_eq!(to_number(&Value::from("")), None);
        assert_eq!(to_number(&Value::from(".")), None);
        assert_eq!(to_number(&Value::from("-")), None);
        assert_eq!(to_number(&Value::from("Infinity.0")), None);
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        assert_eq!(to_number(&Value::Number(f64::NAN)), None);
        assert_eq!(to_number(&Value::Number(f64::INFINITY)), None);
        assert_eq!(to_number(&Value::Bool(true)), None);
        assert_eq!(to_number(&Value::Null), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(!truthy(&Value::Null));
        assert!(!truthy(&Value::from("")));
        assert!(!truthy(&Value::from(0)));
        assert!(!truthy(&Value::Number(f64::NAN)));
        assert!(truthy(&Value::from("false")));
        assert!(truthy(&Value::from(-1)));
        assert!(truthy(&Value::Array(vec![])));
    }

    #[test]
    fn test_date_from_millis() {
        let dt = to_date(&Value::from(1000)).unwrap();
        assert_eq!(dt.unix_timestamp(), 1);
        let dt = to_date(&Value::from(1500.9)).unwrap();
        assert_eq!(dt.unix_timestamp_nanos(), 1_500_000_000);
    }

    #[test]
    fn test_date_rejects_non_positive() {
        assert_eq!(to_date(&Value::from(0)), None);
        assert_eq!(to_date(&Value::from(-5)), None);
        assert_eq!(to_date(&Value::from("1970-01-01T00:00:00Z")), None);
        assert_eq!(to_date(&Value::from("1969-12-31")), None);
        assert_eq!(to_date(&Value::from("1970-01-01T00:00:00.0005Z")), None);
        let dt = to_date(&Value::from("1970-01-01T00:00:00.001Z")).unwrap();
        assert_eq!(dt.unix_timestamp_nanos(), 1_000_000);
    }

    #[test]
    fn test_date_strings() {
        let dt = to_date(&Value::from("2024-03-01T12:00:00+02:00")).unwrap();
        assert_eq!(dt.unix_timestamp(), 1_709_287_200);

        let dt = to_date(&Value::from("2024-03-01")).unwrap();
        assert_eq!(dt.unix_timestamp(), 1_709_251_200);

        let dt = to_date(&Value::from("2024-03-01 10:00:00")).unwrap();
        assert_eq!(dt.unix_timestamp(), 1_709_287_200);

        let dt = to_date(&Value::from("Fri, 01 Mar 2024 10:00:00 +0000")).unwrap();
        assert_eq!(dt.unix_timestamp(), 1_709_287_200);
    }

    #[test]
    fn test_date_rejects_garbage() {
        assert_eq!(to_date(&Value::from("not-a-date")), None);
        assert_eq!(to_date(&Value::Bool(true)), None);
        assert_eq!(to_date(&Value::Null), None);
    }
}
