//! I define canonical JSON equality (§6), used by C4's equality step and by
//! anything comparing `equality` against a query result.
//!

use serde_json::Value;

/// Type-strict, recursive, order-sensitive-for-arrays JSON equality.
///
/// > numbers are equal iff they represent the same mathematical value when
/// > both are numeric; `null` equals only `null`; booleans are not numbers.
///
/// `serde_json::Value`'s derived `PartialEq` is *not* quite this relation:
/// `serde_json::Number` keeps separate internal representations for
/// unsigned, signed, and floating-point literals, so `json!(1) == json!(1.0)`
/// is `false` under the derived impl even though both represent the integer
/// `1`. We recurse manually and compare numbers by extracted value instead.
#[must_use]
pub fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_eq(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, v)| b.get(k).is_some_and(|w| json_eq(v, w)))
        }
        _ => false,
    }
}

fn numbers_eq(a: &serde_json::Number, b: &serde_json::Number) -> bool {
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (a.as_f64(), b.as_f64()) {
        return a == b;
    }
    false
}
