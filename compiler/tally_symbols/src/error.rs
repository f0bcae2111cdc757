use std::path::PathBuf;

use thiserror::Error;

use crate::SymbolKind;

/// Errors raised while declaring or assigning symbols.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    /// The name is already declared with the other kind.
    #[error("`{name}` is already declared as {existing}, cannot declare it as {requested}")]
    Conflict {
        name: String,
        existing: SymbolKind,
        requested: SymbolKind,
    },

    /// Assignment to a name that was never declared.
    #[error("`{name}` is not declared")]
    Undeclared { name: String },

    /// Assignment of the wrong kind of value.
    #[error("`{name}` is {found}, expected {expected}")]
    KindMismatch {
        name: String,
        expected: SymbolKind,
        found: SymbolKind,
    },

    /// Element write past the array length.
    #[error("index {index} is out of range for `{name}` (length {len})")]
    ElementOutOfRange {
        name: String,
        index: usize,
        len: usize,
    },
}

/// Errors raised while reading a values table.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: `{name}` has no value")]
    MissingValue { line: usize, name: String },

    #[error("line {line}: `{text}` is not a valid number")]
    InvalidNumber { line: usize, text: String },

    #[error("line {line}: `{name}` has length {len}, the limit is {max}", max = crate::MAX_ARRAY_LEN)]
    ArrayTooLong {
        line: usize,
        name: String,
        len: usize,
    },

    #[error("line {line}: malformed (index,value) pair `{text}`")]
    MalformedPair { line: usize, text: String },

    #[error("line {line}: {source}")]
    Symbol {
        line: usize,
        #[source]
        source: SymbolError,
    },
}

impl LoadError {
    /// Line the error was found on, if it came from table content.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::Io { .. } => None,
            LoadError::MissingValue { line, .. }
            | LoadError::InvalidNumber { line, .. }
            | LoadError::ArrayTooLong { line, .. }
            | LoadError::MalformedPair { line, .. }
            | LoadError::Symbol { line, .. } => Some(*line),
        }
    }
}
