//! Dynamic streams: sample validation, derived metadata and MGJSON encoding.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{MgJsonError, Result};
use crate::number::{
    encode_number, stream_digits_integer, DIGITS_DECIMAL, LEGAL_MAX, LEGAL_MIN,
};
use crate::property::default_display_name;
use crate::schema::{
    Bounds, DataTypeTag, DynamicDataType, DynamicOutline, EncodedSample, Interpolation,
    NumberPattern, NumberRange, NumberStringProperties, PaddedStringProperties, SampleSet,
};
use crate::timestamp::normalize;

/// One `(time, value)` pair; `time` is seconds from the stream's zero.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((time, value): (f64, f64)) -> Self {
        Self { time, value }
    }
}

impl From<[f64; 2]> for Sample {
    fn from([time, value]: [f64; 2]) -> Self {
        Self { time, value }
    }
}

/// Value type carried by a stream. Only numbers are supported.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamValueType {
    #[default]
    Number,
}

impl StreamValueType {
    pub fn data_type(self) -> DataTypeTag {
        match self {
            StreamValueType::Number => DataTypeTag::NumberString,
        }
    }
}

/// Optional presentation settings for a stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StreamOptions {
    /// Shown in the host tool; derived from the name when absent.
    pub display_name: Option<String>,
    /// Falls back to the document's configured interpolation.
    pub interpolation: Option<Interpolation>,
}

/// A named, validated time series with its derived metadata.
///
/// Only [`StreamEncoder`] constructs streams, so the derived fields always
/// match the samples. The one exception is an interval recorded in an
/// existing document, see [`StreamEncoder::encode_with_interval`].
#[derive(Clone, Debug, PartialEq)]
pub struct Stream {
    name: String,
    display_name: String,
    interpolation: Interpolation,
    value_type: StreamValueType,
    samples: Vec<Sample>,
    min_value: f64,
    max_value: f64,
    start_time: f64,
    end_time: f64,
    sample_interval: Option<f64>,
    digits_integer: u32,
    encoded: Vec<EncodedSample>,
}

impl Stream {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn value_type(&self) -> StreamValueType {
        self.value_type
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Nominal spacing in seconds, `None` for irregular streams.
    pub fn sample_interval(&self) -> Option<f64> {
        self.sample_interval
    }

    pub fn encoded_samples(&self) -> &[EncodedSample] {
        &self.encoded
    }

    /// MGJSON `dataDynamic` outline entry (the stream's metadata block).
    pub fn outline(&self) -> DynamicOutline {
        DynamicOutline {
            display_name: self.display_name.clone(),
            sample_set_id: self.name.clone(),
            data_type: DynamicDataType {
                kind: self.value_type.data_type(),
                number_string_properties: NumberStringProperties {
                    pattern: NumberPattern {
                        is_signed: true,
                        digits_integer: self.digits_integer,
                        digits_decimal: DIGITS_DECIMAL,
                    },
                    range: NumberRange {
                        occuring: Bounds {
                            min: self.min_value,
                            max: self.max_value,
                        },
                        legal: Bounds {
                            min: LEGAL_MIN,
                            max: LEGAL_MAX,
                        },
                    },
                },
                padded_string_properties: PaddedStringProperties::empty(),
            },
            interpolation: self.interpolation,
            has_expected_frequency: self.sample_interval.is_some(),
            sample_count: self.samples.len(),
            match_name: self.name.clone(),
        }
    }

    /// MGJSON sample set holding the encoded samples.
    pub fn sample_set(&self) -> SampleSet {
        let first = self.encoded.first().map(|s| s.time.clone());
        let last = self.encoded.last().map(|s| s.time.clone());
        SampleSet {
            sample_set_id: self.name.clone(),
            start_time: first.unwrap_or_default(),
            end_time: last.unwrap_or_default(),
            sample_interval: self.sample_interval,
            samples: self.encoded.clone(),
        }
    }
}

/// Turns raw samples into a [`Stream`].
#[derive(Clone, Debug)]
pub struct StreamEncoder {
    interval_tolerance: f64,
    interpolation: Interpolation,
}

impl StreamEncoder {
    pub fn new(interval_tolerance: f64, interpolation: Interpolation) -> Self {
        Self {
            interval_tolerance,
            interpolation,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.effective_interval_tolerance(), config.interpolation)
    }

    /// Validate and encode one stream. Normalizer errors are returned as-is.
    pub fn encode(
        &self,
        name: impl Into<String>,
        samples: Vec<Sample>,
        options: StreamOptions,
    ) -> Result<Stream> {
        let name = name.into();
        if name.is_empty() {
            return Err(MgJsonError::EmptyName);
        }

        let series = normalize(&samples, self.interval_tolerance)?;

        let (min_value, max_value) = samples.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), s| {
                let v = s.value + 0.0;
                (lo.min(v), hi.max(v))
            },
        );
        let digits_integer = stream_digits_integer(min_value, max_value);

        let encoded = series
            .times
            .into_iter()
            .zip(&samples)
            .map(|(time, s)| EncodedSample {
                time,
                value: encode_number(s.value, digits_integer),
            })
            .collect();

        let display_name = options
            .display_name
            .unwrap_or_else(|| default_display_name(&name));

        Ok(Stream {
            name,
            display_name,
            interpolation: options.interpolation.unwrap_or(self.interpolation),
            value_type: StreamValueType::Number,
            samples,
            min_value,
            max_value,
            start_time: series.start_time,
            end_time: series.end_time,
            sample_interval: series.sample_interval,
            digits_integer,
            encoded,
        })
    }

    /// Encode a stream whose interval was already decided, typically one read
    /// back from an MGJSON sample set. Samples are validated as in
    /// [`StreamEncoder::encode`]; a recorded interval that is not a positive
    /// finite number is dropped.
    pub fn encode_with_interval(
        &self,
        name: impl Into<String>,
        samples: Vec<Sample>,
        options: StreamOptions,
        sample_interval: Option<f64>,
    ) -> Result<Stream> {
        let mut stream = self.encode(name, samples, options)?;
        stream.sample_interval = sample_interval.filter(|i| i.is_finite() && *i > 0.0);
        Ok(stream)
    }
}

/// Accumulates samples one at a time; validation and derivation are deferred
/// to [`StreamBuilder::finalize`].
#[derive(Clone, Debug, Default)]
pub struct StreamBuilder {
    name: String,
    options: StreamOptions,
    samples: Vec<Sample>,
}

impl StreamBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: StreamOptions::default(),
            samples: Vec::new(),
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.options.display_name = Some(display_name.into());
        self
    }

    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.options.interpolation = Some(interpolation);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn push(&mut self, time: f64, value: f64) -> &mut Self {
        self.samples.push(Sample::new(time, value));
        self
    }

    pub fn extend<S: Into<Sample>>(&mut self, samples: impl IntoIterator<Item = S>) -> &mut Self {
        self.samples.extend(samples.into_iter().map(Into::into));
        self
    }

    /// Run the stream encoder over everything pushed so far.
    pub fn finalize(self, config: &Config) -> Result<Stream> {
        StreamEncoder::from_config(config).encode(self.name, self.samples, self.options)
    }
}
