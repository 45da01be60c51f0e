//! Document assembler: owns properties and streams and produces the MGJSON
//! document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{MgJsonError, Result};
use crate::property::{Property, PropertyOptions};
use crate::schema::{DynamicDataInfo, MgJson, OutlineEntry, UtcInfo};
use crate::stream::{Sample, Stream, StreamBuilder, StreamEncoder, StreamOptions};
use crate::timestamp::PRECISION_LENGTH;

/// Lifecycle of a [`Document`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentState {
    Empty,
    Accumulating,
    /// Set by [`Document::finalize`]; further additions fail.
    Finalized,
}

#[derive(Clone, Debug, PartialEq)]
enum Entry {
    Property(Property),
    Stream(Stream),
}

/// Aggregate root holding every property and stream of one MGJSON document.
///
/// Properties and streams share one namespace. Entries keep insertion order,
/// which is also their order in `dataOutline`.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    config: Config,
    entries: IndexMap<String, Entry>,
    state: DocumentState,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            entries: IndexMap::new(),
            state: DocumentState::Empty,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `name` is taken by a property or a stream.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        match self.entries.get(name) {
            Some(Entry::Property(p)) => Some(p),
            _ => None,
        }
    }

    pub fn stream(&self, name: &str) -> Option<&Stream> {
        match self.entries.get(name) {
            Some(Entry::Stream(s)) => Some(s),
            _ => None,
        }
    }

    /// Properties in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.entries.values().filter_map(|e| match e {
            Entry::Property(p) => Some(p),
            Entry::Stream(_) => None,
        })
    }

    /// Streams in insertion order.
    pub fn streams(&self) -> impl Iterator<Item = &Stream> {
        self.entries.values().filter_map(|e| match e {
            Entry::Stream(s) => Some(s),
            Entry::Property(_) => None,
        })
    }

    /// Add a static property. `value` must be an integer, boolean or string.
    pub fn add_property(
        &mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Result<()> {
        self.add_property_with(name, value, PropertyOptions::default())
    }

    pub fn add_property_with(
        &mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
        options: PropertyOptions,
    ) -> Result<()> {
        let name = name.into();
        self.check_insertable(&name)?;
        let property = Property::new(name, &value.into(), options)?;
        log::debug!(
            "added property '{}' ({})",
            property.name(),
            property.kind().tag()
        );
        self.insert(Entry::Property(property));
        Ok(())
    }

    /// Add a dynamic stream from a complete, time-ordered sample sequence.
    pub fn add_stream<S: Into<Sample>>(
        &mut self,
        name: impl Into<String>,
        samples: impl IntoIterator<Item = S>,
    ) -> Result<()> {
        self.add_stream_with(name, samples, StreamOptions::default())
    }

    pub fn add_stream_with<S: Into<Sample>>(
        &mut self,
        name: impl Into<String>,
        samples: impl IntoIterator<Item = S>,
        options: StreamOptions,
    ) -> Result<()> {
        let name = name.into();
        self.check_insertable(&name)?;
        let samples: Vec<Sample> = samples.into_iter().map(Into::into).collect();
        let stream = StreamEncoder::from_config(&self.config).encode(name, samples, options)?;
        self.insert_stream(stream);
        Ok(())
    }

    /// Add a stream read back from a document, keeping its recorded interval
    /// instead of inferring one under this document's tolerance.
    pub(crate) fn add_recorded_stream(
        &mut self,
        name: String,
        samples: Vec<Sample>,
        options: StreamOptions,
        sample_interval: Option<f64>,
    ) -> Result<()> {
        self.check_insertable(&name)?;
        let stream = StreamEncoder::from_config(&self.config).encode_with_interval(
            name,
            samples,
            options,
            sample_interval,
        )?;
        self.insert_stream(stream);
        Ok(())
    }

    /// Finalize an incrementally built stream and add it.
    pub fn add_stream_from(&mut self, builder: StreamBuilder) -> Result<()> {
        self.check_insertable(builder.name())?;
        let stream = builder.finalize(&self.config)?;
        self.insert_stream(stream);
        Ok(())
    }

    /// Snapshot the current state as an MGJSON document. Does not change the
    /// document's state; identical state always yields identical output.
    pub fn serialize(&self) -> MgJson {
        let has_streams = self.streams().next().is_some();
        log::trace!(
            "serializing {} entries (dynamic: {})",
            self.entries.len(),
            has_streams
        );

        let data_outline = self
            .entries
            .values()
            .map(|e| match e {
                Entry::Property(p) => OutlineEntry::Static(p.outline()),
                Entry::Stream(s) => OutlineEntry::Dynamic(s.outline()),
            })
            .collect();

        let (dynamic_data_info, data_dynamic_samples) = if has_streams {
            (
                Some(DynamicDataInfo {
                    use_timecode: false,
                    utc_info: UtcInfo {
                        precision_length: PRECISION_LENGTH,
                        is_gmt: true,
                    },
                }),
                Some(self.streams().map(Stream::sample_set).collect()),
            )
        } else {
            (None, None)
        };

        MgJson {
            version: self.config.version.as_str().to_string(),
            creator: self.config.creator.clone(),
            dynamic_samples_present: has_streams,
            dynamic_data_info,
            data_outline,
            data_dynamic_samples,
        }
    }

    /// Snapshot and freeze: later additions fail with
    /// [`MgJsonError::DocumentFrozen`].
    pub fn finalize(&mut self) -> MgJson {
        self.state = DocumentState::Finalized;
        self.serialize()
    }

    /// Shorthand for `serialize()` rendered as pretty JSON text.
    pub fn to_json_string(&self) -> Result<String> {
        self.serialize().to_json_string()
    }

    fn check_insertable(&self, name: &str) -> Result<()> {
        if self.state == DocumentState::Finalized {
            return Err(MgJsonError::DocumentFrozen);
        }
        if name.is_empty() {
            return Err(MgJsonError::EmptyName);
        }
        if self.entries.contains_key(name) {
            return Err(MgJsonError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn insert_stream(&mut self, stream: Stream) {
        log::debug!(
            "added stream '{}' ({} samples, interval {:?})",
            stream.name(),
            stream.sample_count(),
            stream.sample_interval()
        );
        self.insert(Entry::Stream(stream));
    }

    fn insert(&mut self, entry: Entry) {
        let name = match &entry {
            Entry::Property(p) => p.name().to_string(),
            Entry::Stream(s) => s.name().to_string(),
        };
        self.entries.insert(name, entry);
        self.state = DocumentState::Accumulating;
    }
}
