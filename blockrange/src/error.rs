//! Error types for block range operations.

use std::fmt;

/// Which end of a range a point token occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Start,
    End,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Start => write!(f, "start"),
            Position::End => write!(f, "end"),
        }
    }
}

/// A typed failure from the range grammar.
///
/// Every variant that points at bad input carries the offending text
/// verbatim, surrounding whitespace included, so callers can re-prompt or
/// highlight without parsing the formatted message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("wrong modifier: '{token}' is neither a step nor a known period")]
    WrongModifier { token: String },

    #[error("wrong {position} point: '{token}' is not a block number, date or known keyword")]
    WrongPoint { token: String, position: Position },

    #[error("empty range expression")]
    Empty,
}

impl ParseError {
    /// The offending token, if the failure names one.
    pub fn token(&self) -> Option<&str> {
        match self {
            ParseError::WrongModifier { token } | ParseError::WrongPoint { token, .. } => {
                Some(token)
            }
            ParseError::Empty => None,
        }
    }

    /// The position of a bad point token.
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::WrongPoint { position, .. } => Some(*position),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Output error: {0}")]
    Output(String),
}

pub type Result<T> = std::result::Result<T, Error>;
