use crate::config::{Config, SchemaVersion};
use crate::document::Document;
use crate::error::{MgJsonError, Result};
use crate::number::parse_number_string;
use crate::property::PropertyOptions;
use crate::schema::{MgJson, OutlineEntry};
use crate::stream::{Sample, StreamOptions};
use crate::timestamp::parse_timestamp;

/// Public API: parse MGJSON text produced by this crate back into a [`Document`].
///
/// Notes:
/// - Outline entries are replayed in order, so names, display names and
///   interpolation survive. Each stream keeps the `sampleInterval` its sample
///   set recorded; the rest of the derived metadata is recomputed.
/// - The decoded document uses the default [`Config`] apart from version and
///   creator; use [`Document::from_mgjson_with`] to pick the settings that
///   apply to streams added afterwards.
/// - Sample times come back at millisecond precision and values at 15 decimals,
///   which is what the document stored.
/// - Only documents this crate writes are supported; foreign MGJSON may use
///   parts of the schema this model does not cover.
pub fn parse_mgjson_json(s: &str) -> Result<Document> {
    let doc: MgJson = serde_json::from_str(s)?;
    Document::from_mgjson(&doc)
}

impl Document {
    /// Rebuild a document from its MGJSON form.
    pub fn from_mgjson(doc: &MgJson) -> Result<Self> {
        Self::from_mgjson_with(doc, Config::default())
    }

    /// Rebuild a document, taking version and creator from `doc` and every
    /// other setting from `config`.
    pub fn from_mgjson_with(doc: &MgJson, config: Config) -> Result<Self> {
        let version =
            SchemaVersion::parse(&doc.version).ok_or_else(|| MgJsonError::UnsupportedSchemaVersion {
                version: doc.version.clone(),
            })?;
        let mut out = Document::with_config(Config {
            version,
            creator: doc.creator.clone(),
            ..config
        });

        for entry in &doc.data_outline {
            match entry {
                OutlineEntry::Static(s) => {
                    out.add_property_with(
                        s.match_name.clone(),
                        s.value.clone(),
                        PropertyOptions {
                            display_name: Some(s.display_name.clone()),
                        },
                    )?;
                }
                OutlineEntry::Dynamic(d) => {
                    let set = doc.sample_set(&d.sample_set_id).ok_or_else(|| {
                        MgJsonError::MissingSampleSet {
                            name: d.sample_set_id.clone(),
                        }
                    })?;
                    let samples = set
                        .samples
                        .iter()
                        .map(|s| {
                            Ok(Sample::new(
                                parse_timestamp(&s.time)?,
                                parse_number_string(&s.value)?,
                            ))
                        })
                        .collect::<Result<Vec<_>>>()?;
                    let interval = set.sample_interval.filter(|_| d.has_expected_frequency);
                    out.add_recorded_stream(
                        d.match_name.clone(),
                        samples,
                        StreamOptions {
                            display_name: Some(d.display_name.clone()),
                            interpolation: Some(d.interpolation),
                        },
                        interval,
                    )?;
                }
            }
        }
        Ok(out)
    }
}
