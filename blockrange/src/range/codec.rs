//! JSON codec for [`BlockRange`].
//!
//! The two directions are deliberately not inverses:
//!
//! - **decode** reads a JSON string holding the compact grammar
//!   (`"000000000-10567003"`) and hands it to the parser;
//! - **encode** dumps the verbose object with all six keys and every
//!   sub-field, zero/empty for the branches that are not in use.
//!
//! Feeding encoder output back into the decoder is an error, since the
//! decoder only takes strings. Use the compact `Display` form to go back.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use super::parser::{BlockRange, Parser};
use super::token::{ModifierFields, PointFields, TokenCode};
use crate::Result;

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct VerboseRange {
    start_type: TokenCode,
    start: PointFields,
    end_type: TokenCode,
    end: PointFields,
    modifier_type: TokenCode,
    modifier: ModifierFields,
}

impl From<&BlockRange> for VerboseRange {
    fn from(range: &BlockRange) -> Self {
        Self {
            start_type: range.start_type(),
            start: range.start().to_fields(),
            end_type: range.end_type(),
            end: range.end().to_fields(),
            modifier_type: range.modifier_type(),
            modifier: range.modifier().to_fields(),
        }
    }
}

impl Serialize for BlockRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        VerboseRange::from(self).serialize(serializer)
    }
}

struct CompactVisitor;

impl<'de> Visitor<'de> for CompactVisitor {
    type Value = BlockRange;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a block range string such as \"10-1000:10\"")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<BlockRange, E> {
        super::parser::parse(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for BlockRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_str(CompactVisitor)
    }
}

/// Verbose JSON text for a range.
pub fn encode(range: &BlockRange) -> Result<String> {
    Ok(serde_json::to_string(range)?)
}

/// Verbose JSON text, indented.
pub fn encode_pretty(range: &BlockRange) -> Result<String> {
    Ok(serde_json::to_string_pretty(range)?)
}

/// Decode a JSON string scalar with the default keywords.
pub fn decode(json: &str) -> Result<BlockRange> {
    decode_with(&Parser::default(), json)
}

/// Decode a JSON string scalar with a configured parser.
///
/// A non-string JSON value fails as [`crate::Error::Json`]; a string the
/// grammar rejects fails as [`crate::Error::Parse`] with its token intact.
pub fn decode_with(parser: &Parser, json: &str) -> Result<BlockRange> {
    let compact: String = serde_json::from_str(json)?;
    Ok(parser.parse(&compact)?)
}
