//! Evaluation of tally expressions.
//!
//! ```text
//! expr ──► normalize ──► tokenize ──► Evaluator ──► f64
//!                                       │   ▲
//!                                       ▼   │ recursive call per group
//!                                   match_span
//! ```
//!
//! Evaluation is a pure function of the expression and a frozen
//! [`SymbolTable`]: the table is only read, the token cursor is local to each
//! call, and re-evaluating the same input always produces the same result.

mod config;
mod error;
mod evaluator;
mod operators;
mod span_match;

pub use config::{EvalConfig, IndexPolicy};
pub use error::{ErrorCode, ErrorKind, EvalError, EvalResult};
pub use evaluator::IndexAnomaly;
pub use operators::{evaluate_binary, BinaryOp};
pub use span_match::{match_span, BracketSpan, Delimiter};

use tally_lexer::{normalize, tokenize};
use tally_symbols::SymbolTable;
use tracing::debug;

use evaluator::Evaluator;

/// Result of a successful evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub value: f64,
    /// Out-of-range subscripts read as `0` under [`IndexPolicy::Lenient`].
    pub anomalies: Vec<IndexAnomaly>,
}

/// Evaluate `expr` with the default (lenient) configuration.
pub fn evaluate(expr: &str, symbols: &SymbolTable) -> EvalResult<f64> {
    evaluate_with(expr, symbols, &EvalConfig::default()).map(|evaluation| evaluation.value)
}

/// Evaluate `expr`, returning the value and any recoverable anomalies.
///
/// Error spans refer to `normalize(expr)`.
pub fn evaluate_with(
    expr: &str,
    symbols: &SymbolTable,
    config: &EvalConfig,
) -> EvalResult<Evaluation> {
    let source = normalize(expr);
    let tokens = tokenize(&source);
    debug!(expr = %source, tokens = tokens.len(), ?config, "evaluate");

    let mut evaluator = Evaluator::new(&source, tokens.as_slice(), symbols, *config);
    let value = evaluator.eval_all()?;
    let anomalies = evaluator.into_anomalies();

    debug!(value, anomalies = anomalies.len(), "evaluated");
    Ok(Evaluation { value, anomalies })
}
