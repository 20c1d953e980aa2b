//! Float-to-Decimal Normalization
//!
//! The record store rejects native binary floating-point values. Every
//! float scalar is rewritten as an exact decimal built from the float's
//! shortest round-trip representation, never from the binary float
//! directly, so `98.6` is stored as `"98.6"` and not a long binary
//! expansion.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Recursively replace every floating-point scalar in `value` with its
/// decimal string form. Integers, strings, booleans, nulls, mapping keys,
/// and ordering are left untouched. A float whose shortest form does not
/// fit a decimal is left as-is.
pub fn decimalize(value: Value) -> Value {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => Decimal::from_str(&format!("{}", f))
                .map(|d| Value::String(d.to_string()))
                .unwrap_or(Value::Number(n)),
            _ => Value::Number(n),
        },
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (key, decimalize(inner)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(decimalize).collect()),
        other => other,
    }
}
