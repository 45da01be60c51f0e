//! MGJSON 2.0.0 document model (serde).
//!
//! Field names and nesting follow the published schema, including its
//! `hasExpectedFrequecyB` spelling. Field order in these structs is the order
//! fields are rendered.

use serde::{Deserialize, Serialize};

use crate::error::{MgJsonError, Result};
use crate::value::ScalarValue;

/// Top-level MGJSON document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MgJson {
    pub version: String,
    pub creator: String,
    #[serde(rename = "dynamicSamplesPresentB")]
    pub dynamic_samples_present: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_data_info: Option<DynamicDataInfo>,
    pub data_outline: Vec<OutlineEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dynamic_samples: Option<Vec<SampleSet>>,
}

impl MgJson {
    /// Render as a `serde_json::Value`.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| MgJsonError::Serialize {
            reason: e.to_string(),
        })
    }

    /// Render as pretty-printed JSON text with stable field order.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| MgJsonError::Serialize {
            reason: e.to_string(),
        })
    }

    /// Sample set for a dynamic outline entry.
    pub fn sample_set(&self, id: &str) -> Option<&SampleSet> {
        self.data_dynamic_samples
            .as_deref()
            .and_then(|sets| sets.iter().find(|s| s.sample_set_id == id))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicDataInfo {
    #[serde(rename = "useTimecodeB")]
    pub use_timecode: bool,
    pub utc_info: UtcInfo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtcInfo {
    pub precision_length: u8,
    #[serde(rename = "isGMT")]
    pub is_gmt: bool,
}

/// One entry of `dataOutline`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "objectType")]
pub enum OutlineEntry {
    #[serde(rename = "dataStatic")]
    Static(StaticOutline),
    #[serde(rename = "dataDynamic")]
    Dynamic(DynamicOutline),
}

impl OutlineEntry {
    pub fn match_name(&self) -> &str {
        match self {
            OutlineEntry::Static(s) => &s.match_name,
            OutlineEntry::Dynamic(d) => &d.match_name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticOutline {
    pub display_name: String,
    pub data_type: StaticDataType,
    pub match_name: String,
    pub value: ScalarValue,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataTypeTag {
    Number,
    Boolean,
    String,
    NumberString,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticDataType {
    #[serde(rename = "type")]
    pub kind: DataTypeTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_string_properties: Option<NumberStringProperties<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padded_string_properties: Option<PaddedStringProperties>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberStringProperties<T> {
    pub pattern: NumberPattern,
    pub range: NumberRange<T>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberPattern {
    pub is_signed: bool,
    pub digits_integer: u32,
    pub digits_decimal: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumberRange<T> {
    /// Range actually present in the data.
    pub occuring: Bounds<T>,
    pub legal: Bounds<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaddedStringProperties {
    pub max_len: u32,
    pub max_digits_in_str_length: u32,
    #[serde(rename = "eventMarkerB")]
    pub event_marker: bool,
}

impl PaddedStringProperties {
    /// Placeholder carried by numeric streams.
    pub fn empty() -> Self {
        Self {
            max_len: 0,
            max_digits_in_str_length: 0,
            event_marker: false,
        }
    }
}

/// How a consumer should fill the time between two samples.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Hold,
    Linear,
}

/// Metadata block describing one dynamic stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicOutline {
    pub display_name: String,
    #[serde(rename = "sampleSetID")]
    pub sample_set_id: String,
    pub data_type: DynamicDataType,
    pub interpolation: Interpolation,
    #[serde(rename = "hasExpectedFrequecyB")]
    pub has_expected_frequency: bool,
    pub sample_count: usize,
    pub match_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicDataType {
    #[serde(rename = "type")]
    pub kind: DataTypeTag,
    pub number_string_properties: NumberStringProperties<f64>,
    pub padded_string_properties: PaddedStringProperties,
}

/// Samples of one dynamic stream, keyed by `sampleSetID`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSet {
    #[serde(rename = "sampleSetID")]
    pub sample_set_id: String,
    pub start_time: String,
    pub end_time: String,
    /// Nominal spacing in seconds; `null` when samples are irregular.
    pub sample_interval: Option<f64>,
    pub samples: Vec<EncodedSample>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedSample {
    pub time: String,
    pub value: String,
}
