//! Command handlers for the `tally` CLI.
//!
//! Each submodule implements one command. Handlers return data rather than
//! printing, so `main.rs` owns all output and exit codes. Option parsing and
//! the shared error type live here in the module root.

use std::path::PathBuf;

use tally_eval::{EvalConfig, EvalError, IndexPolicy};
use tally_symbols::{LoadError, SymbolError};
use thiserror::Error;

mod batch;
mod eval;
mod lex;
mod symbols;

pub use batch::{evaluate_batch, BatchLine};
pub use eval::{eval_expression, EvalOutput};
pub use lex::format_tokens;
pub use symbols::{collect_symbols, format_symbols, SymbolsOutput};

/// Anything that stops a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),

    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Symbol(#[from] SymbolError),

    /// Symbol conflict between lines of a batch file.
    #[error("line {line}: {source}")]
    BatchSymbol {
        line: usize,
        #[source]
        source: SymbolError,
    },

    /// `expr` is the normalized expression the error span refers to.
    #[error("{error}")]
    Eval { expr: String, error: EvalError },
}

/// Options for `tally eval` and `tally symbols`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalOptions {
    pub values: Option<PathBuf>,
    pub config: EvalConfig,
}

/// Options for `tally batch`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOptions {
    pub values: PathBuf,
    pub config: EvalConfig,
    pub parallel: bool,
}

/// Parse `<expr...> [--values=<file>] [--strict-index]`.
///
/// Positional words are joined with spaces, so `tally eval 2 + 3` works.
pub fn parse_eval_args(args: &[String]) -> Result<(String, EvalOptions), CommandError> {
    let mut options = EvalOptions::default();
    let mut words = Vec::new();

    for arg in args {
        if let Some(path) = arg.strip_prefix("--values=") {
            options.values = Some(PathBuf::from(path));
        } else if arg == "--strict-index" {
            options.config = options.config.with_index_policy(IndexPolicy::Strict);
        } else if arg.starts_with("--") {
            return Err(CommandError::Usage(format!("unknown option '{arg}'")));
        } else {
            words.push(arg.as_str());
        }
    }

    if words.is_empty() {
        return Err(CommandError::Usage("missing expression".to_string()));
    }
    Ok((words.join(" "), options))
}

/// Parse `<exprs-file> --values=<file> [--strict-index] [--no-parallel]`.
pub fn parse_batch_args(args: &[String]) -> Result<(PathBuf, BatchOptions), CommandError> {
    let mut values = None;
    let mut config = EvalConfig::default();
    let mut parallel = true;
    let mut path = None;

    for arg in args {
        if let Some(file) = arg.strip_prefix("--values=") {
            values = Some(PathBuf::from(file));
        } else if arg == "--strict-index" {
            config = EvalConfig::strict();
        } else if arg == "--no-parallel" {
            parallel = false;
        } else if arg.starts_with("--") {
            return Err(CommandError::Usage(format!("unknown option '{arg}'")));
        } else if path.is_none() {
            path = Some(PathBuf::from(arg));
        } else {
            return Err(CommandError::Usage(format!("unexpected argument '{arg}'")));
        }
    }

    let path = path.ok_or_else(|| CommandError::Usage("missing expressions file".to_string()))?;
    let values =
        values.ok_or_else(|| CommandError::Usage("missing --values=<file>".to_string()))?;
    Ok((
        path,
        BatchOptions {
            values,
            config,
            parallel,
        },
    ))
}

fn read_file(path: &std::path::Path) -> Result<String, CommandError> {
    std::fs::read_to_string(path).map_err(|source| CommandError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests;
