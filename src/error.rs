//! Error types
//!
//! "No match" is never an error. Everything here is a caller mistake
//! detected before or during normalization.

use core::fmt;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Which input sequence an element came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sequence {
    Pattern,
    Target,
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sequence::Pattern => f.write_str("pattern"),
            Sequence::Target => f.write_str("target"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid {option}: {value:?} (expected \"any\" or \"non-negative\")")]
    InvalidGap { option: &'static str, value: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unhashable {kind} at {sequence} position {position} (set ensure_hashable to convert it)")]
    Unhashable {
        sequence: Sequence,
        position: usize,
        kind: &'static str,
    },

    #[error("cyclic structure at {sequence} position {position}")]
    Cyclic { sequence: Sequence, position: usize },

    #[error("nesting deeper than {limit} levels at {sequence} position {position}")]
    TooDeep {
        sequence: Sequence,
        position: usize,
        limit: usize,
    },
}

/// Failure to derive a key, before the element's location is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyError {
    Unhashable(&'static str),
    Cyclic,
    TooDeep(usize),
}

impl KeyError {
    /// Attach the location of the offending element.
    pub(crate) fn at(self, sequence: Sequence, position: usize) -> Error {
        match self {
            KeyError::Unhashable(kind) => Error::Unhashable {
                sequence,
                position,
                kind,
            },
            KeyError::Cyclic => Error::Cyclic { sequence, position },
            KeyError::TooDeep(limit) => Error::TooDeep {
                sequence,
                position,
                limit,
            },
        }
    }
}
