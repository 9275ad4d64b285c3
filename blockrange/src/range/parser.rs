//! Parser for the compact range grammar.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use super::token::{Modifier, Point, TokenCode};
use crate::config::Keywords;
use crate::error::{ParseError, Position};

/// Length of a `YYYY-MM-DD` date literal.
const DATE_LEN: usize = 10;

/// A parsed range: start boundary, optional end boundary, optional modifier.
///
/// Only the parser builds these, so the start is always defined and each
/// token code always matches the variant it describes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockRange {
    start: Point,
    end: Point,
    modifier: Modifier,
}

impl BlockRange {
    pub fn start(&self) -> &Point {
        &self.start
    }

    pub fn end(&self) -> &Point {
        &self.end
    }

    pub fn modifier(&self) -> &Modifier {
        &self.modifier
    }

    pub fn start_type(&self) -> TokenCode {
        self.start.token_code()
    }

    pub fn end_type(&self) -> TokenCode {
        self.end.token_code()
    }

    pub fn modifier_type(&self) -> TokenCode {
        self.modifier.token_code()
    }
}

/// Canonical compact form: `start[-end][:modifier]`.
impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)?;
        if self.end.is_defined() {
            write!(f, "-{}", self.end)?;
        }
        if self.modifier.is_defined() {
            write!(f, ":{}", self.modifier)?;
        }
        Ok(())
    }
}

impl FromStr for BlockRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Range parser bound to a set of keyword catalogs.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    keywords: Keywords,
}

/// Parse an expression with the default keyword catalogs.
pub fn parse(input: &str) -> Result<BlockRange, ParseError> {
    Parser::default().parse(input)
}

impl Parser {
    pub fn new(keywords: Keywords) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    /// Parse `start[-end][:modifier]` into a [`BlockRange`].
    pub fn parse(&self, input: &str) -> Result<BlockRange, ParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseError::Empty);
        }

        // Modifier splits once, from the right
        let (range, modifier) = match input.rsplit_once(':') {
            Some((range, modifier)) => (range, Some(modifier)),
            None => (input, None),
        };

        let (start, end) = split_range(range);
        trace!(start, ?end, ?modifier, "split range expression");

        let start = self.parse_point(start, Position::Start)?;
        let end = match end {
            Some(token) => self.parse_point(token, Position::End)?,
            None => Point::NotDefined,
        };
        let modifier = match modifier {
            Some(token) => self.parse_modifier(token)?,
            None => Modifier::NotDefined,
        };

        let range = BlockRange {
            start,
            end,
            modifier,
        };
        debug!(
            input,
            start_type = ?range.start_type(),
            end_type = ?range.end_type(),
            modifier_type = ?range.modifier_type(),
            "parsed block range"
        );
        Ok(range)
    }

    fn parse_point(&self, raw: &str, position: Position) -> Result<Point, ParseError> {
        let token = raw.trim();
        let wrong = || ParseError::WrongPoint {
            token: raw.to_string(),
            position,
        };

        if token.is_empty() {
            return Err(wrong());
        }
        if is_numeric(token) {
            return token.parse().map(Point::BlockNumber).map_err(|_| wrong());
        }
        if is_date(token) {
            return Ok(Point::Date(token.to_string()));
        }
        // A stray dash in the end token means a malformed range, not a keyword
        if token.contains('-') || !self.keywords.is_special(token) {
            return Err(wrong());
        }
        Ok(Point::Special(token.to_string()))
    }

    fn parse_modifier(&self, raw: &str) -> Result<Modifier, ParseError> {
        let token = raw.trim();
        let wrong = || ParseError::WrongModifier {
            token: raw.to_string(),
        };

        if is_numeric(token) {
            return token.parse().map(Modifier::Step).map_err(|_| wrong());
        }
        if self.keywords.is_period(token) {
            return Ok(Modifier::Period(token.to_string()));
        }
        Err(wrong())
    }
}

/// Split the range part into start and optional end.
///
/// A leading date literal keeps its own dashes; otherwise the first `-`
/// separates start from end.
fn split_range(range: &str) -> (&str, Option<&str>) {
    let trimmed = range.trim();
    if is_date(trimmed) {
        return (range, None);
    }
    if let (Some(head), Some(rest)) = (trimmed.get(..DATE_LEN), trimmed.get(DATE_LEN..)) {
        if is_date(head) {
            if let Some(end) = rest.trim_start().strip_prefix('-') {
                return (head, Some(end));
            }
        }
    }
    match range.split_once('-') {
        Some((start, end)) => (start, Some(end)),
        None => (range, None),
    }
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Lexical date shape: `DDDD-DD-DD` or `DDDD/DD/DD`, same separator twice.
pub(crate) fn is_date(token: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.len() != DATE_LEN {
        return false;
    }
    let sep = bytes[4];
    if (sep != b'-' && sep != b'/') || bytes[7] != sep {
        return false;
    }
    bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 4 && *i != 7)
        .all(|(_, b)| b.is_ascii_digit())
}
