//! The equality predicate used by the diff traversal.
//!
//! Decides whether two values count as "unchanged". Beyond structural
//! equality it widens numbers across integer/float representations and
//! compares date-like strings by instant rather than by text, so a snapshot
//! writer that reformats timestamps does not produce phantom changes.

use chrono::DateTime;
use serde_json::{Number, Value};

/// Returns `true` if `a` and `b` are equal for diffing purposes.
///
/// Rules, in order: primitive/structural equality (numbers compared
/// numerically), null never equals non-null, date-like strings compared by
/// epoch milliseconds, arrays elementwise after a length check, objects by
/// key set and recursive value equality. Everything else is unequal.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    if scalar_equal(a, b) {
        return true;
    }
    if a.is_null() || b.is_null() {
        return false;
    }
    if let (Some(ta), Some(tb)) = (epoch_millis(a), epoch_millis(b)) {
        return ta == tb;
    }
    match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Array(_), _) | (_, Value::Array(_)) => false,
        (Value::Object(ma), Value::Object(mb)) => {
            ma.len() == mb.len()
                && ma
                    .iter()
                    .all(|(k, va)| mb.get(k).is_some_and(|vb| values_equal(va, vb)))
        }
        _ => false,
    }
}

/// Strict comparison as the traversal applies it to leaf values: structural
/// equality, with numbers widened across representations (1 equals 1.0).
pub(crate) fn scalar_equal(a: &Value, b: &Value) -> bool {
    if let (Value::Number(x), Value::Number(y)) = (a, b) {
        return numbers_equal(x, y);
    }
    a == b
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Epoch milliseconds of a date-like value. A value is date-like when it is
/// a string that parses as RFC 3339; bare numbers carry no date intent.
fn epoch_millis(v: &Value) -> Option<i64> {
    let s = v.as_str()?;
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitives() {
        assert!(values_equal(&json!(1), &json!(1)));
        assert!(values_equal(&json!("a"), &json!("a")));
        assert!(values_equal(&json!(true), &json!(true)));
        assert!(values_equal(&Value::Null, &Value::Null));
        assert!(!values_equal(&json!(1), &json!(2)));
        assert!(!values_equal(&json!("a"), &json!("b")));
    }

    #[test]
    fn numbers_widen_across_representations() {
        assert!(values_equal(&json!(1), &json!(1.0)));
        assert!(!values_equal(&json!(1), &json!(1.5)));
    }

    #[test]
    fn null_never_equals_non_null() {
        assert!(!values_equal(&Value::Null, &json!(0)));
        assert!(!values_equal(&json!(""), &Value::Null));
        assert!(!values_equal(&Value::Null, &json!({})));
    }

    #[test]
    fn date_like_strings_compare_by_instant() {
        assert!(values_equal(
            &json!("2024-01-01T00:00:00Z"),
            &json!("2024-01-01T00:00:00.000Z"),
        ));
        assert!(values_equal(
            &json!("2024-01-01T00:00:00Z"),
            &json!("2024-01-01T01:00:00+01:00"),
        ));
        assert!(!values_equal(
            &json!("2024-01-01T00:00:00Z"),
            &json!("2024-01-01T00:00:01Z"),
        ));
    }

    #[test]
    fn non_date_strings_stay_textual() {
        assert!(!values_equal(&json!("2024-01-01"), &json!("2024-01-02")));
        assert!(!values_equal(&json!("abc"), &json!("2024-01-01T00:00:00Z")));
    }

    #[test]
    fn arrays_elementwise() {
        assert!(values_equal(&json!([1, 2, 3]), &json!([1, 2, 3])));
        assert!(!values_equal(&json!([1, 2, 3]), &json!([1, 9, 3])));
        assert!(!values_equal(&json!([1, 2]), &json!([1, 2, 3])));
        assert!(!values_equal(&json!([1]), &json!(1)));
    }

    #[test]
    fn objects_by_key_set() {
        assert!(values_equal(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1})));
        assert!(!values_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!values_equal(&json!({"a": 1}), &json!({"a": 2})));
    }

    #[test]
    fn deep_nesting() {
        let a = json!({"p": {"x": [1, {"c": 2}], "y": null}});
        let b = json!({"p": {"x": [1, {"c": 2}], "y": null}});
        assert!(values_equal(&a, &b));

        let c = json!({"p": {"x": [1, {"c": 3}], "y": null}});
        assert!(!values_equal(&a, &c));
    }

    #[test]
    fn mismatched_kinds() {
        assert!(!values_equal(&json!({"a": 1}), &json!([1])));
        assert!(!values_equal(&json!("1"), &json!(1)));
        assert!(!values_equal(&json!(0), &json!(false)));
    }
}
