//! Compact block range grammar.
//!
//! # Syntax Overview
//!
//! Full pattern: `start[-end][:modifier]`
//!
//! - **Points** (start/end): block number `10567003`, date `2021-10-03`,
//!   or a special keyword such as `london`
//! - **Range**: `start-end`; a leading date keeps its own dashes
//! - **Modifier**: numeric step `:10` or period keyword `:weekly`
//!
//! The `:` separator splits once, from the right.

mod codec;
mod parser;
mod token;

pub use codec::{decode, decode_with, encode, encode_pretty};
pub use parser::{parse, BlockRange, Parser};
pub use token::{
    classify_modifier, classify_point, Modifier, ModifierFields, Point, PointFields, TokenCode,
};
