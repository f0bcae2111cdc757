//! Evaluation errors.
//!
//! Every error carries the span of the offending tokens in the normalized
//! expression, a stable [`ErrorCode`], and an [`ErrorKind`] naming its place
//! in the taxonomy.

use std::fmt;

use tally_lexer::Span;
use thiserror::Error;

/// Result type for evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

/// Error codes for evaluation diagnostics.
///
/// Format: E1xxx for evaluation errors.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Unknown identifier
    E1001,
    /// Unbalanced bracket
    E1002,
    /// Division by zero
    E1003,
    /// Array index out of range (strict index policy)
    E1004,
    /// Malformed expression
    E1005,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure taxonomy.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    UnknownIdentifier,
    UnbalancedBracket,
    DivisionByZero,
    ArrayIndexOutOfRange,
    MalformedExpression,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnknownIdentifier => "UnknownIdentifier",
            ErrorKind::UnbalancedBracket => "UnbalancedBracket",
            ErrorKind::DivisionByZero => "DivisionByZero",
            ErrorKind::ArrayIndexOutOfRange => "ArrayIndexOutOfRange",
            ErrorKind::MalformedExpression => "MalformedExpression",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An evaluation failure. Fatal: the whole expression has no value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("unknown identifier `{name}`")]
    UnknownIdentifier { name: String, span: Span },

    /// An opener with no closer, or a closer with no opener.
    #[error("unbalanced `{bracket}`")]
    UnbalancedBracket { bracket: char, span: Span },

    #[error("division by zero")]
    DivisionByZero { span: Span },

    #[error("index {index} is out of range for array `{name}` of length {len}")]
    ArrayIndexOutOfRange {
        name: String,
        index: f64,
        len: usize,
        span: Span,
    },

    #[error("malformed expression: {message}")]
    MalformedExpression { message: String, span: Span },
}

impl EvalError {
    pub fn malformed(message: impl Into<String>, span: Span) -> Self {
        EvalError::MalformedExpression {
            message: message.into(),
            span,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::UnknownIdentifier { .. } => ErrorKind::UnknownIdentifier,
            EvalError::UnbalancedBracket { .. } => ErrorKind::UnbalancedBracket,
            EvalError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            EvalError::ArrayIndexOutOfRange { .. } => ErrorKind::ArrayIndexOutOfRange,
            EvalError::MalformedExpression { .. } => ErrorKind::MalformedExpression,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind() {
            ErrorKind::UnknownIdentifier => ErrorCode::E1001,
            ErrorKind::UnbalancedBracket => ErrorCode::E1002,
            ErrorKind::DivisionByZero => ErrorCode::E1003,
            ErrorKind::ArrayIndexOutOfRange => ErrorCode::E1004,
            ErrorKind::MalformedExpression => ErrorCode::E1005,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            EvalError::UnknownIdentifier { span, .. }
            | EvalError::UnbalancedBracket { span, .. }
            | EvalError::DivisionByZero { span }
            | EvalError::ArrayIndexOutOfRange { span, .. }
            | EvalError::MalformedExpression { span, .. } => *span,
        }
    }
}

#[cfg(test)]
mod tests;
