//! Document configuration for mgjson-core.

use serde::{Deserialize, Serialize};

use crate::schema::Interpolation;

/// Relative spread allowed between consecutive sample deltas before a stream is
/// considered irregular.
pub const DEFAULT_INTERVAL_TOLERANCE: f64 = 0.01;

/// MGJSON schema revisions this crate can emit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaVersion {
    #[default]
    #[serde(rename = "MGJSON2.0.0")]
    V2_0_0,
}

impl SchemaVersion {
    /// Value written to the top-level `version` field.
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVersion::V2_0_0 => "MGJSON2.0.0",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MGJSON2.0.0" => Some(SchemaVersion::V2_0_0),
            _ => None,
        }
    }
}

/// Configuration for a document. The schema version is explicit here rather
/// than an ambient default so other revisions can be selected per document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: SchemaVersion,
    /// Written to the top-level `creator` field.
    pub creator: String,
    /// Allowed relative spread of sample deltas around their median.
    pub interval_tolerance: f64,
    /// Interpolation for streams that do not choose one.
    pub interpolation: Interpolation,
}

impl Config {
    /// Tolerance actually used for interval inference; invalid values fall back
    /// to [`DEFAULT_INTERVAL_TOLERANCE`].
    pub fn effective_interval_tolerance(&self) -> f64 {
        if self.interval_tolerance.is_finite() && self.interval_tolerance >= 0.0 {
            self.interval_tolerance
        } else {
            log::warn!(
                "invalid interval tolerance {}; using {}",
                self.interval_tolerance,
                DEFAULT_INTERVAL_TOLERANCE
            );
            DEFAULT_INTERVAL_TOLERANCE
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SchemaVersion::default(),
            creator: env!("CARGO_PKG_NAME").to_string(),
            interval_tolerance: DEFAULT_INTERVAL_TOLERANCE,
            interpolation: Interpolation::default(),
        }
    }
}
