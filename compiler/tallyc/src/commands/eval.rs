//! `tally eval`: discover, load, evaluate one expression.

use tally_eval::{evaluate_with, Evaluation};
use tally_lexer::normalize;
use tally_symbols::{discover, load_values_from_path};
use tracing::warn;

use super::{CommandError, EvalOptions};

/// A successful `tally eval`.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalOutput {
    /// Normalized expression; anomaly spans refer to it.
    pub source: String,
    pub evaluation: Evaluation,
}

/// Evaluate `expr`. Without a values file every discovered symbol is zero.
pub fn eval_expression(expr: &str, options: &EvalOptions) -> Result<EvalOutput, CommandError> {
    let mut builder = discover(expr)?;
    if let Some(path) = &options.values {
        let report = load_values_from_path(&mut builder, path)?;
        for name in &report.skipped {
            warn!(name = %name, path = %path.display(), "value for unused symbol ignored");
        }
    }
    let table = builder.build();

    let source = normalize(expr);
    match evaluate_with(&source, &table, &options.config) {
        Ok(evaluation) => Ok(EvalOutput { source, evaluation }),
        Err(error) => Err(CommandError::Eval { expr: source, error }),
    }
}
