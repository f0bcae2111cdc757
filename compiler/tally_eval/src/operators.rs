//! Binary operators.
//!
//! The operator set is fixed, so dispatch is a plain `match`.

use tally_lexer::{Span, TokenKind};

use crate::{EvalError, EvalResult};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// `+` or `-`: the expression level.
    pub fn additive(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    /// `*` or `/`: the term level.
    pub fn multiplicative(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }
}

/// Apply `op`. `span` covers the operator and its right operand and is
/// reported on division by zero.
pub fn evaluate_binary(lhs: f64, rhs: f64, op: BinaryOp, span: Span) -> EvalResult<f64> {
    match op {
        BinaryOp::Add => Ok(lhs + rhs),
        BinaryOp::Sub => Ok(lhs - rhs),
        BinaryOp::Mul => Ok(lhs * rhs),
        BinaryOp::Div if rhs == 0.0 => Err(EvalError::DivisionByZero { span }),
        BinaryOp::Div => Ok(lhs / rhs),
    }
}
