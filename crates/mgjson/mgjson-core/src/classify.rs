//! Value classifier: maps loosely typed caller input onto [`ScalarValue`].

use serde_json::Value as JsonValue;

use crate::error::{MgJsonError, Result};
use crate::value::ScalarValue;

/// Classify a caller-supplied value as an MGJSON static scalar.
///
/// Booleans are checked before numbers. Only integer-typed numbers are
/// accepted; floating point numbers (including whole ones such as `3.0`),
/// `null`, arrays and objects are rejected.
pub fn classify(value: &JsonValue) -> Result<ScalarValue> {
    match value {
        JsonValue::Bool(b) => Ok(ScalarValue::Boolean(*b)),
        JsonValue::Number(n) => n
            .as_i64()
            .map(ScalarValue::Integer)
            .ok_or_else(|| unsupported(if n.is_f64() { "float" } else { "integer out of range" })),
        JsonValue::String(s) => Ok(ScalarValue::Text(s.clone())),
        JsonValue::Null => Err(unsupported("null")),
        JsonValue::Array(_) => Err(unsupported("array")),
        JsonValue::Object(_) => Err(unsupported("object")),
    }
}

fn unsupported(found: &str) -> MgJsonError {
    MgJsonError::UnsupportedValueType {
        found: found.to_string(),
    }
}
