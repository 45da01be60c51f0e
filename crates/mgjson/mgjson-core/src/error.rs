//! Error types for MGJSON document building and decoding.

/// Every failure the encoder, the document assembler or the decoder can report.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MgJsonError {
    /// Static property value is not an integer, boolean or string
    #[error("Unsupported value type for static property: {found}")]
    UnsupportedValueType { found: String },

    /// Property or stream name is empty
    #[error("Name must not be empty")]
    EmptyName,

    /// Stream was given zero samples
    #[error("Stream has no samples")]
    EmptySeries,

    /// Sample timestamps went backwards
    #[error("Sample {index} has timestamp {current} before previous timestamp {previous}")]
    UnsortedSamples {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("Sample {index} has a non-finite timestamp")]
    NonFiniteTimestamp { index: usize },

    #[error("Sample {index} has a non-finite value")]
    NonFiniteValue { index: usize },

    /// Offset cannot be represented as a calendar timestamp
    #[error("Timestamp offset {seconds}s is outside the encodable range")]
    TimestampOutOfRange { seconds: f64 },

    /// Name already used by a property or a stream
    #[error("Duplicate name: {name}")]
    DuplicateName { name: String },

    /// Mutation attempted after `Document::finalize`
    #[error("Document is finalized and can no longer be modified")]
    DocumentFrozen,

    #[error("Unsupported MGJSON schema version: {version}")]
    UnsupportedSchemaVersion { version: String },

    #[error("Dynamic outline entry '{name}' has no matching sample set")]
    MissingSampleSet { name: String },

    #[error("Invalid MGJSON timestamp: {value}")]
    InvalidTimestamp { value: String },

    #[error("Invalid MGJSON number string: {value}")]
    InvalidNumberString { value: String },

    #[error("Parse error: {reason}")]
    Parse { reason: String },

    #[error("Serialization error: {reason}")]
    Serialize { reason: String },
}

impl MgJsonError {
    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnsupportedValueType { .. }
            | Self::EmptyName
            | Self::EmptySeries
            | Self::UnsortedSamples { .. }
            | Self::NonFiniteTimestamp { .. }
            | Self::NonFiniteValue { .. }
            | Self::TimestampOutOfRange { .. } => "input",
            Self::DuplicateName { .. } | Self::DocumentFrozen => "state",
            Self::UnsupportedSchemaVersion { .. }
            | Self::MissingSampleSet { .. }
            | Self::InvalidTimestamp { .. }
            | Self::InvalidNumberString { .. }
            | Self::Parse { .. } => "decode",
            Self::Serialize { .. } => "render",
        }
    }
}

impl From<serde_json::Error> for MgJsonError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}

/// Result type for MGJSON operations
pub type Result<T> = std::result::Result<T, MgJsonError>;
