//! Static properties.

use crate::classify::classify;
use crate::error::{MgJsonError, Result};
use crate::number::{digit_count, LEGAL_MAX, LEGAL_MIN};
use crate::schema::{
    Bounds, NumberPattern, NumberRange, NumberStringProperties, PaddedStringProperties,
    StaticDataType, StaticOutline,
};
use crate::value::{ScalarKind, ScalarValue};

/// Optional presentation settings for a property.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyOptions {
    /// Shown in the host tool; derived from the name when absent.
    pub display_name: Option<String>,
}

/// A named static scalar. Immutable once created.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    name: String,
    display_name: String,
    value: ScalarValue,
}

impl Property {
    /// Classify `value` and build a property from it.
    pub fn new(
        name: impl Into<String>,
        value: &serde_json::Value,
        options: PropertyOptions,
    ) -> Result<Self> {
        let value = classify(value)?;
        Self::from_scalar(name, value, options)
    }

    /// Build a property from an already classified value.
    pub fn from_scalar(
        name: impl Into<String>,
        value: ScalarValue,
        options: PropertyOptions,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(MgJsonError::EmptyName);
        }
        let display_name = options
            .display_name
            .unwrap_or_else(|| default_display_name(&name));
        Ok(Self {
            name,
            display_name,
            value,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn kind(&self) -> ScalarKind {
        self.value.kind()
    }

    pub fn value(&self) -> &ScalarValue {
        &self.value
    }

    /// MGJSON `dataStatic` outline entry for this property.
    pub fn outline(&self) -> StaticOutline {
        let kind = self.kind();
        let mut data_type = StaticDataType {
            kind: kind.data_type(),
            number_string_properties: None,
            padded_string_properties: None,
        };
        match &self.value {
            ScalarValue::Integer(i) => {
                data_type.number_string_properties = Some(NumberStringProperties {
                    pattern: NumberPattern {
                        is_signed: true,
                        digits_integer: digit_count(i.unsigned_abs()),
                        digits_decimal: 0,
                    },
                    range: NumberRange {
                        occuring: Bounds { min: *i, max: *i },
                        legal: Bounds {
                            min: LEGAL_MIN,
                            max: LEGAL_MAX,
                        },
                    },
                });
            }
            ScalarValue::Text(s) => {
                let max_len = s.chars().count() as u32;
                data_type.padded_string_properties = Some(PaddedStringProperties {
                    max_len,
                    max_digits_in_str_length: digit_count(u64::from(max_len)),
                    event_marker: false,
                });
            }
            ScalarValue::Boolean(_) => {}
        }
        StaticOutline {
            display_name: self.display_name.clone(),
            data_type,
            match_name: self.name.clone(),
            value: self.value.clone(),
        }
    }
}

/// Display name used when the caller gives none: first character upper-cased,
/// the rest lower-cased (`"numberOfCats"` -> `"Numberofcats"`).
pub fn default_display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
