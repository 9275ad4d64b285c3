//! Block ranges: compact `start-end:modifier` expressions and their
//! verbose JSON form.
//!
//! Parsing, classification and encoding are pure functions; nothing here
//! touches the filesystem or the network.

pub mod config;
pub mod error;
pub mod manifest;
pub mod range;

pub use config::Keywords;
pub use error::{Error, ParseError, Position, Result};
pub use manifest::{CsvFormatted, Manifest, ManifestRange, ManifestRangeError, PinDescriptor, PinsList};
pub use range::{
    classify_modifier, classify_point, parse, BlockRange, Modifier, ModifierFields, Parser, Point,
    PointFields, TokenCode,
};
