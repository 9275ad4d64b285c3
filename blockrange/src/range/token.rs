//! Token codes, boundary values and the classifier.

use std::fmt;

use serde::{Serialize, Serializer};

/// Discriminator shared by points and modifiers.
///
/// The numeric values are part of the JSON wire format. Points only ever
/// carry `BlockNumber`, `Special`, `Date` or `NotDefined`; modifiers only
/// ever carry `Step`, `Period` or `NotDefined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenCode {
    BlockNumber = 0,
    Special = 1,
    Date = 2,
    Step = 3,
    Period = 4,
    NotDefined = 5,
}

impl TokenCode {
    /// Code valid for a start/end point.
    pub fn is_point(self) -> bool {
        matches!(
            self,
            TokenCode::BlockNumber | TokenCode::Special | TokenCode::Date | TokenCode::NotDefined
        )
    }

    /// Code valid for a modifier.
    pub fn is_modifier(self) -> bool {
        matches!(self, TokenCode::Step | TokenCode::Period | TokenCode::NotDefined)
    }
}

impl TryFrom<u8> for TokenCode {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TokenCode::BlockNumber),
            1 => Ok(TokenCode::Special),
            2 => Ok(TokenCode::Date),
            3 => Ok(TokenCode::Step),
            4 => Ok(TokenCode::Period),
            5 => Ok(TokenCode::NotDefined),
            other => Err(other),
        }
    }
}

impl Serialize for TokenCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl fmt::Display for TokenCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenCode::BlockNumber => "block number",
            TokenCode::Special => "special",
            TokenCode::Date => "date",
            TokenCode::Step => "step",
            TokenCode::Period => "period",
            TokenCode::NotDefined => "not defined",
        };
        f.write_str(name)
    }
}

/// A start or end boundary of a range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Point {
    BlockNumber(u64),
    /// Date literal, kept exactly as written.
    Date(String),
    Special(String),
    #[default]
    NotDefined,
}

/// Optional qualifier after `:`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Modifier {
    Step(u64),
    Period(String),
    #[default]
    NotDefined,
}

/// Flat verbose shape of a point, as written to JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PointFields {
    pub block: u64,
    pub date: String,
    pub special: String,
}

/// Flat verbose shape of a modifier, as written to JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifierFields {
    pub step: u64,
    pub period: String,
}

/// Classify a flat point. First match wins: block, special, date.
///
/// A block of 0 reads as absent here; callers holding a real block 0 must
/// use [`Point::BlockNumber`] directly rather than round-tripping through
/// the flat shape.
pub fn classify_point(fields: &PointFields) -> TokenCode {
    if fields.block != 0 {
        TokenCode::BlockNumber
    } else if !fields.special.is_empty() {
        TokenCode::Special
    } else if !fields.date.is_empty() {
        TokenCode::Date
    } else {
        TokenCode::NotDefined
    }
}

/// Classify a flat modifier. First match wins: step, period.
pub fn classify_modifier(fields: &ModifierFields) -> TokenCode {
    if fields.step != 0 {
        TokenCode::Step
    } else if !fields.period.is_empty() {
        TokenCode::Period
    } else {
        TokenCode::NotDefined
    }
}

impl Point {
    pub fn token_code(&self) -> TokenCode {
        match self {
            Point::BlockNumber(_) => TokenCode::BlockNumber,
            Point::Date(_) => TokenCode::Date,
            Point::Special(_) => TokenCode::Special,
            Point::NotDefined => TokenCode::NotDefined,
        }
    }

    pub fn is_defined(&self) -> bool {
        !matches!(self, Point::NotDefined)
    }

    pub fn block(&self) -> Option<u64> {
        match self {
            Point::BlockNumber(n) => Some(*n),
            _ => None,
        }
    }

    /// Build a point from its flat shape using [`classify_point`].
    pub fn from_fields(fields: PointFields) -> Self {
        match classify_point(&fields) {
            TokenCode::BlockNumber => Point::BlockNumber(fields.block),
            TokenCode::Special => Point::Special(fields.special),
            TokenCode::Date => Point::Date(fields.date),
            _ => Point::NotDefined,
        }
    }

    /// Expand to the flat shape; unused branches stay zero/empty.
    pub fn to_fields(&self) -> PointFields {
        let mut fields = PointFields::default();
        match self {
            Point::BlockNumber(n) => fields.block = *n,
            Point::Date(d) => fields.date = d.clone(),
            Point::Special(s) => fields.special = s.clone(),
            Point::NotDefined => {}
        }
        fields
    }
}

impl Modifier {
    pub fn token_code(&self) -> TokenCode {
        match self {
            Modifier::Step(_) => TokenCode::Step,
            Modifier::Period(_) => TokenCode::Period,
            Modifier::NotDefined => TokenCode::NotDefined,
        }
    }

    pub fn is_defined(&self) -> bool {
        !matches!(self, Modifier::NotDefined)
    }

    /// Build a modifier from its flat shape using [`classify_modifier`].
    pub fn from_fields(fields: ModifierFields) -> Self {
        match classify_modifier(&fields) {
            TokenCode::Step => Modifier::Step(fields.step),
            TokenCode::Period => Modifier::Period(fields.period),
            _ => Modifier::NotDefined,
        }
    }

    pub fn to_fields(&self) -> ModifierFields {
        let mut fields = ModifierFields::default();
        match self {
            Modifier::Step(n) => fields.step = *n,
            Modifier::Period(p) => fields.period = p.clone(),
            Modifier::NotDefined => {}
        }
        fields
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::BlockNumber(n) => write!(f, "{}", n),
            Point::Date(s) | Point::Special(s) => f.write_str(s),
            Point::NotDefined => Ok(()),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Step(n) => write!(f, "{}", n),
            Modifier::Period(p) => f.write_str(p),
            Modifier::NotDefined => Ok(()),
        }
    }
}
