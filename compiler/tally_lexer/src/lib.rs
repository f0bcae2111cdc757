//! Tokenizer for tally expressions.
//!
//! An expression is split on the fixed delimiter set
//! `{space, tab, '*', '+', '-', '/', '(', ')', '[', ']'}`. Every maximal run
//! of non-delimiter characters becomes one word token (identifier, number, or
//! invalid), every non-whitespace delimiter becomes a single-character token,
//! and whitespace is discarded.
//!
//! ```text
//! "a[i+1] * 2"
//!   Ident  LBracket  Ident  Plus  Number(1)  RBracket  Star  Number(2)
//! ```
//!
//! [`Tokenizer`] is lazy; [`tokenize`] collects it into a [`TokenList`] that
//! the evaluator walks with a cursor.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
pub use tokenizer::{tokenize, Tokenizer};

/// Strip every whitespace character from `expr`.
///
/// Expressions are normalized once before evaluation so that spans in
/// diagnostics refer to the same text the evaluator saw.
pub fn normalize(expr: &str) -> String {
    expr.chars().filter(|c| !c.is_whitespace()).collect()
}
