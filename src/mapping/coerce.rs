//! Value coercion applied before validation.
//!
//! Input sources often hand over numbers for fields that the widget stores as
//! text, or `null` for fields left blank. These functions normalize such values
//! so they pass type checking instead of being rejected.

use serde_json::Value;

/// Convert a number, string or absent value to its string form.
///
/// Absent values and `null` become the empty string. Booleans, arrays and
/// objects are not coercible and return `None`.
///
/// ```
/// use pdf_formfill::mapping::coerce::any_to_str;
/// use serde_json::json;
///
/// assert_eq!(any_to_str(Some(&json!(10000.78))).as_deref(), Some("10000.78"));
/// assert_eq!(any_to_str(Some(&json!(null))).as_deref(), Some(""));
/// assert_eq!(any_to_str(None).as_deref(), Some(""));
/// ```
pub fn any_to_str(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(_) => None,
    }
}

/// Lax boolean parsing for checkbox input.
///
/// Accepts JSON booleans, the integers `0` and `1`, and the strings
/// `true/false`, `yes/no`, `on/off`, `t/f`, `y/n`, `1/0` in any case.
pub fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => match n.as_f64() {
                Some(f) if f == 0.0 => Some(false),
                Some(f) if f == 1.0 => Some(true),
                _ => None,
            },
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "t" | "y" | "1" => Some(true),
            "false" | "no" | "off" | "f" | "n" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Truncate a float to an integer, for record fields that require an int
/// but may be handed a float. `null` stays `null`.
///
/// Returns `None` when the value is neither a number nor `null`, or when the
/// truncated float does not fit in an `i64` or `u64`.
pub fn number_to_int(value: &Value) -> Option<Value> {
    // 2^63 and 2^64 are exact as f64; `i64::MAX as f64` rounds up to 2^63.
    const I64_RANGE: std::ops::Range<f64> = -9_223_372_036_854_775_808.0..9_223_372_036_854_775_808.0;
    const U64_RANGE: std::ops::Range<f64> = 0.0..18_446_744_073_709_551_616.0;

    match value {
        Value::Null => Some(Value::Null),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(Value::from(i));
            }
            if let Some(u) = n.as_u64() {
                return Some(Value::from(u));
            }
            let truncated = n.as_f64()?.trunc();
            if I64_RANGE.contains(&truncated) {
                Some(Value::from(truncated as i64))
            } else if U64_RANGE.contains(&truncated) {
                Some(Value::from(truncated as u64))
            } else {
                None
            }
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_any_to_str_numbers() {
        assert_eq!(any_to_str(Some(&json!(10000.78))), Some("10000.78".to_string()));
        assert_eq!(any_to_str(Some(&json!(4))), Some("4".to_string()));
        assert_eq!(any_to_str(Some(&json!(-12))), Some("-12".to_string()));
    }

    #[test]
    fn test_any_to_str_absent_is_empty() {
        assert_eq!(any_to_str(None), Some(String::new()));
        assert_eq!(any_to_str(Some(&Value::Null)), Some(String::new()));
    }

    #[test]
    fn test_any_to_str_passes_strings_through() {
        assert_eq!(any_to_str(Some(&json!("John Doe"))), Some("John Doe".to_string()));
    }

    #[test]
    fn test_any_to_str_rejects_other_kinds() {
        assert_eq!(any_to_str(Some(&json!(true))), None);
        assert_eq!(any_to_str(Some(&json!(["a"]))), None);
        assert_eq!(any_to_str(Some(&json!({"a": 1}))), None);
    }

    #[test]
    fn test_to_bool() {
        assert_eq!(to_bool(&json!(true)), Some(true));
        assert_eq!(to_bool(&json!(0)), Some(false));
        assert_eq!(to_bool(&json!(1)), Some(true));
        assert_eq!(to_bool(&json!("Yes")), Some(true));
        assert_eq!(to_bool(&json!("off")), Some(false));
        assert_eq!(to_bool(&json!(2)), None);
        assert_eq!(to_bool(&json!("maybe")), None);
        assert_eq!(to_bool(&Value::Null), None);
    }

    #[test]
    fn test_number_to_int() {
        assert_eq!(number_to_int(&json!(12345.67)), Some(json!(12345)));
        assert_eq!(number_to_int(&json!(3)), Some(json!(3)));
        assert_eq!(number_to_int(&Value::Null), Some(Value::Null));
        assert_eq!(number_to_int(&json!("3")), None);
    }

    #[test]
    fn test_number_to_int_out_of_range() {
        assert_eq!(
            number_to_int(&json!(-9_223_372_036_854_775_808.0f64)),
            Some(json!(i64::MIN))
        );
        assert_eq!(
            number_to_int(&json!(1e19)),
            Some(json!(10_000_000_000_000_000_000u64))
        );
        assert_eq!(number_to_int(&json!(-1e19)), None);
        assert_eq!(number_to_int(&json!(1e20)), None);
    }
}
