//! Forgiving field deserializers for hand-written or form-submitted routes.
//!
//! Route records arrive from loosely typed sources (browser forms, hand-edited
//! JSON/YAML), so a wrong-typed scalar is coerced instead of rejecting the
//! whole record. Whatever cannot be coerced becomes the field's default and is
//! then reported by the validator as a missing value.

use crate::route::{RouteMode, SmartShield};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Coerce any scalar into a string. `null` and containers become empty.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => {
            debug!(value = %other, "discarding non-scalar value for string field");
            String::new()
        }
    })
}

/// Coerce any value into a boolean using form-style truthiness.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(truthy(&value).unwrap_or(false))
}

/// Like [`flag`], but keeps `null` as `None`.
pub(crate) fn opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(truthy(&value))
}

/// Record that a key was present, even when its value is `null`.
///
/// Used with `#[serde(default)]`: a missing key stays `None`, a present
/// `null` becomes `Some(None)`.
pub(crate) fn present_opt_flag<'de, D>(deserializer: D) -> Result<Option<Option<bool>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(truthy(&value)))
}

/// Parse a mode string. Empty or missing modes are `None`; anything else is
/// matched as written.
pub(crate) fn mode<'de, D>(deserializer: D) -> Result<Option<RouteMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = string(deserializer)?;
    if raw.is_empty() {
        Ok(None)
    } else {
        Ok(Some(RouteMode::from(raw.as_str())))
    }
}

/// Accept only an object for SmartShield; anything else counts as absent.
pub(crate) fn smart_shield<'de, D>(deserializer: D) -> Result<Option<SmartShield>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Object(_) => match serde_json::from_value(value) {
            Ok(shield) => Ok(Some(shield)),
            Err(e) => {
                debug!(error = %e, "unreadable SmartShield object, treating as absent");
                Ok(None)
            }
        },
        _ => Ok(None),
    }
}

fn truthy(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().map(|f| f != 0.0).unwrap_or(false)),
        Value::String(s) => {
            let s = s.trim().to_ascii_lowercase();
            Some(matches!(s.as_str(), "true" | "1" | "yes" | "on"))
        }
        Value::Array(_) | Value::Object(_) => Some(true),
    }
}
