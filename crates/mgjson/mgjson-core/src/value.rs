//! Scalar kinds and typed values for static properties.

use serde::{Deserialize, Serialize};

use crate::schema::DataTypeTag;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScalarKind {
    Integer,
    Boolean,
    Text,
}

impl ScalarKind {
    /// Short logical name ("int", "bool", "string").
    pub fn tag(self) -> &'static str {
        match self {
            ScalarKind::Integer => "int",
            ScalarKind::Boolean => "bool",
            ScalarKind::Text => "string",
        }
    }

    /// MGJSON `dataType.type` used for this kind in a static outline entry.
    pub fn data_type(self) -> DataTypeTag {
        match self {
            ScalarKind::Integer => DataTypeTag::Number,
            ScalarKind::Boolean => DataTypeTag::Boolean,
            ScalarKind::Text => DataTypeTag::String,
        }
    }
}

/// Closed set of values a static property can hold. Serialized as the bare
/// JSON scalar, which is how MGJSON stores `value` on static entries.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ScalarValue {
    Boolean(bool),
    Integer(i64),
    Text(String),
}

impl ScalarValue {
    #[inline]
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::Integer(_) => ScalarKind::Integer,
            ScalarValue::Boolean(_) => ScalarKind::Boolean,
            ScalarValue::Text(_) => ScalarKind::Text,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScalarValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<ScalarValue> for serde_json::Value {
    fn from(value: ScalarValue) -> Self {
        match value {
            ScalarValue::Integer(i) => serde_json::Value::from(i),
            ScalarValue::Boolean(b) => serde_json::Value::Bool(b),
            ScalarValue::Text(s) => serde_json::Value::String(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_serde_keeps_bare_scalars() {
        let values = vec![
            ScalarValue::Integer(3),
            ScalarValue::Boolean(false),
            ScalarValue::Text("A new adventure awaits!".into()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[3,false,"A new adventure awaits!"]"#);
        let back: Vec<ScalarValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn untagged_serde_rejects_fractional_numbers() {
        assert!(serde_json::from_str::<ScalarValue>("1.5").is_err());
    }

    #[test]
    fn kinds_map_to_tags_and_wire_types() {
        assert_eq!(ScalarKind::Integer.tag(), "int");
        assert_eq!(ScalarKind::Boolean.tag(), "bool");
        assert_eq!(ScalarKind::Text.tag(), "string");
        assert_eq!(ScalarKind::Integer.data_type(), DataTypeTag::Number);
        assert_eq!(ScalarKind::Boolean.data_type(), DataTypeTag::Boolean);
        assert_eq!(ScalarKind::Text.data_type(), DataTypeTag::String);
    }
}
