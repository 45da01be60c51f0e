//! mgjson-core: builds MGJSON documents for data-driven motion graphics.
//!
//! A [`Document`] collects static properties (integer, boolean or text values)
//! and dynamic streams (time-ordered numeric samples), then produces an
//! [`MgJson`] value following the MGJSON 2.0.0 schema. Rendering that value to
//! text is a `serde_json` call away; writing it anywhere is left to the caller.
//!
//! ```
//! use mgjson_core::Document;
//!
//! let mut doc = Document::new();
//! doc.add_property("numberOfCats", 3)?;
//! doc.add_stream("temperature", [(0.0, 1.0), (2.59292, 0.777)])?;
//! let json = doc.serialize().to_json_string()?;
//! assert!(json.contains("\"version\": \"MGJSON2.0.0\""));
//! # Ok::<(), mgjson_core::MgJsonError>(())
//! ```

pub mod classify;
pub mod config;
pub mod decode;
pub mod document;
pub mod error;
pub mod number;
pub mod property;
pub mod schema;
pub mod stream;
pub mod timestamp;
pub mod value;

// Re-exports for consumers
pub use classify::classify;
pub use config::{Config, SchemaVersion};
pub use decode::parse_mgjson_json;
pub use document::{Document, DocumentState};
pub use error::{MgJsonError, Result};
pub use property::{Property, PropertyOptions};
pub use schema::{Interpolation, MgJson, OutlineEntry, SampleSet};
pub use stream::{Sample, Stream, StreamBuilder, StreamEncoder, StreamOptions};
pub use timestamp::{encode_timestamp, normalize, NormalizedSeries};
pub use value::{ScalarKind, ScalarValue};
