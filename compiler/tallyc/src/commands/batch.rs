//! `tally batch`: many expressions, one shared table.
//!
//! Symbols from every line are declared in a single builder before the values
//! file is read, so one table serves the whole batch. The frozen table is then
//! shared by reference across rayon workers.

use std::path::Path;

use rayon::prelude::*;
use tally_eval::{evaluate_with, EvalResult, Evaluation};
use tally_lexer::normalize;
use tally_symbols::{discover_into, load_values_from_path, SymbolTableBuilder};
use tracing::debug;

use super::{read_file, BatchOptions, CommandError};

/// Outcome for one non-blank line of the expressions file.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchLine {
    /// 1-based line number in the expressions file.
    pub line: usize,
    /// Normalized expression.
    pub source: String,
    pub result: EvalResult<Evaluation>,
}

/// Evaluate every non-blank line of `path`. Results keep file order.
pub fn evaluate_batch(path: &Path, options: &BatchOptions) -> Result<Vec<BatchLine>, CommandError> {
    let text = read_file(path)?;
    let lines: Vec<(usize, String)> = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, normalize(line)))
        .filter(|(_, source)| !source.is_empty())
        .collect();

    let mut builder = SymbolTableBuilder::new();
    for (line, source) in &lines {
        discover_into(&mut builder, source).map_err(|source| CommandError::BatchSymbol {
            line: *line,
            source,
        })?;
    }
    let report = load_values_from_path(&mut builder, &options.values)?;
    debug!(
        lines = lines.len(),
        scalars = report.scalars,
        arrays = report.arrays,
        skipped = report.skipped.len(),
        "batch table loaded"
    );
    let table = builder.build();

    let eval_line = |(line, source): &(usize, String)| BatchLine {
        line: *line,
        source: source.clone(),
        result: evaluate_with(source, &table, &options.config),
    };

    let results = if options.parallel {
        lines.par_iter().map(eval_line).collect()
    } else {
        lines.iter().map(eval_line).collect()
    };
    Ok(results)
}
