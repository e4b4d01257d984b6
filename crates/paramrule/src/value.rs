//! Scalar helpers shared by predicates and formatters.
//!
//! Parameter values arrive as [`serde_json::Value`]. Gateway parameters are
//! loosely typed (amounts may be `10`, `"10"` or `"10.00"`), so the helpers
//! here treat numeric strings as numbers wherever a rule asks "is this
//! numeric", while keeping strict type checks where a rule demands them.

use regex::Regex;
use serde_json::{Number, Value};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::sync::OnceLock;

static NUMERIC_REGEX: OnceLock<Regex> = OnceLock::new();
static SPLIT_REGEX: OnceLock<Regex> = OnceLock::new();

fn numeric_regex() -> &'static Regex {
    NUMERIC_REGEX.get_or_init(|| {
        Regex::new(r"^[ \t\n\r\x0B\x0C]*[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?[ \t\n\r\x0B\x0C]*$")
            .unwrap()
    })
}

fn split_regex() -> &'static Regex {
    SPLIT_REGEX.get_or_init(|| Regex::new(r"\s*,\s*").unwrap())
}

/// Normalize a rule argument into an ordered sequence.
///
/// - arrays are returned as they are
/// - strings are split on commas, trimming whitespace around each comma
///   (`"a, b ,c"` becomes `["a", "b", "c"]`)
/// - `null` yields an empty sequence
/// - any other scalar yields a one-element sequence
pub fn split_arguments(argument: &Value) -> Vec<Value> {
    match argument {
        Value::Array(items) => items.clone(),
        Value::String(s) => split_regex()
            .split(s)
            .map(|part| Value::String(part.to_string()))
            .collect(),
        Value::Null => Vec::new(),
        other => vec![other.clone()],
    }
}

/// Canonical text of a number; whole-valued floats print without a fraction.
pub fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(f) if number.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        _ => number.to_string(),
    }
}

/// Render a value as a short token for use inside messages.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null value".to_string(),
        Value::Bool(true) => "(boolean) true".to_string(),
        Value::Bool(false) => "(boolean) false".to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Text of a rule argument as substituted into a message.
///
/// Booleans follow string-cast rules (`true` is `"1"`, `false` is empty)
/// and sequences are joined with `", "`.
pub fn literal(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(literal).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
    }
}

/// Whether the value is a number or a numeric string.
///
/// Numeric strings use decimal notation with an optional sign, fraction and
/// exponent, and may be surrounded by whitespace. Hex, `inf` and `nan` are
/// not numeric.
pub fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => numeric_regex().is_match(s),
        _ => false,
    }
}

/// Numeric value of a number or numeric string.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric(s),
        _ => None,
    }
}

fn parse_numeric(text: &str) -> Option<f64> {
    if numeric_regex().is_match(text) {
        text.trim().parse().ok()
    } else {
        None
    }
}

/// Text of a string or number; `None` for every other kind of value.
pub fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(number_text(n))),
        _ => None,
    }
}

/// Length in Unicode scalar values.
pub fn char_length(text: &str) -> usize {
    text.chars().count()
}

/// Truthiness used by activation-switch rules.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Loose equality.
///
/// Numbers and numeric strings compare by value, booleans compare against
/// the other side's truthiness, and `null` equals every falsy non-string
/// value and the empty string.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), other) | (other, Value::Bool(x)) => *x == is_truthy(other),
        (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
        (Value::Null, other) | (other, Value::Null) => !is_truthy(other),
        (Value::Number(_), Value::Number(_)) => as_number(a) == as_number(b),
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            match parse_numeric(s) {
                Some(parsed) => n.as_f64() == Some(parsed),
                None => number_text(n) == *s,
            }
        }
        (Value::String(x), Value::String(y)) => match (as_number(a), as_number(b)) {
            (Some(p), Some(q)) => p == q,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Ordering used to pick the bounds of a split argument.
///
/// Two numeric values compare numerically; anything else compares by text.
pub fn compare(a: &Value, b: &Value) -> Ordering {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => literal(a).cmp(&literal(b)),
    }
}

/// Smallest and largest element of a sequence, or `None` when it is empty.
pub fn bounds(items: &[Value]) -> Option<(&Value, &Value)> {
    let min = items.iter().min_by(|a, b| compare(a, b))?;
    let max = items.iter().max_by(|a, b| compare(a, b))?;
    Some((min, max))
}
