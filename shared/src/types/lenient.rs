//! Lenient numeric decoding for remote records
//!
//! The management API is loose about numbers: the same field can arrive as a
//! JSON number, a numeric string or `null`. These helpers coerce such values
//! instead of rejecting the record.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Reads a value as a finite float. Numbers pass through and numeric strings
/// are parsed; everything else is `None`.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Reads a value as a non-negative limit. Fractions truncate, negatives clamp to zero.
pub fn value_as_limit(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    if let Some(n) = value.as_i64() {
        return Some(n.max(0) as u64);
    }
    value_as_f64(value).map(|v| if v <= 0.0 { 0 } else { v.trunc() as u64 })
}

/// Reads a value as an integer id, accepting numeric strings.
pub fn value_as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// `deserialize_with` helper: float that defaults to `0.0` when null or malformed
pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64).unwrap_or(0.0))
}

/// `deserialize_with` helper: optional float, `None` when null or malformed
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64))
}

/// `deserialize_with` helper: string that defaults to empty when null or not a string
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}

/// `deserialize_with` helper: required integer id
pub fn id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_as_id(&value).ok_or_else(|| de::Error::custom(format!("invalid partner id: {value}")))
}
