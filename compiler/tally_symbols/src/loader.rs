//! Values table loading.
//!
//! One symbol per line:
//!
//! ```text
//! x 5
//! a 3 (0,10) (1,20) (2,30)
//! ```
//!
//! A scalar line is a name and a value. An array line is a name, a length,
//! and any number of sparse `(index,value)` pairs; unlisted indices stay `0`.
//! Lines naming symbols the expression never mentions are skipped.

use std::path::Path;

use tracing::{debug, trace};

use crate::{LoadError, SymbolError, SymbolKind, SymbolTableBuilder};

/// Longest array a values table may declare (16M elements, 128 MiB).
pub const MAX_ARRAY_LEN: usize = 1 << 24;

/// What a load pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub scalars: usize,
    pub arrays: usize,
    /// Names present in the table but not declared in the builder.
    pub skipped: Vec<String>,
}

/// Read `path` and load it into `builder`.
pub fn load_values_from_path(
    builder: &mut SymbolTableBuilder,
    path: impl AsRef<Path>,
) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_values(builder, &source)
}

/// Assign values from a table to the names declared in `builder`.
pub fn load_values(
    builder: &mut SymbolTableBuilder,
    source: &str,
) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();

    for (index, text) in source.lines().enumerate() {
        let line = index + 1;
        let (name, rest) = split_word(text);
        if name.is_empty() {
            continue;
        }

        let Some(kind) = builder.kind_of(name) else {
            debug!(line, name, "skipping undeclared symbol");
            report.skipped.push(name.to_owned());
            continue;
        };

        let (value, rest) = split_word(rest);
        if value.is_empty() {
            return Err(LoadError::MissingValue {
                line,
                name: name.to_owned(),
            });
        }

        let symbol_err = |source: SymbolError| LoadError::Symbol { line, source };
        match kind {
            SymbolKind::Scalar => {
                if !rest.trim().is_empty() {
                    return Err(symbol_err(SymbolError::KindMismatch {
                        name: name.to_owned(),
                        expected: SymbolKind::Array,
                        found: SymbolKind::Scalar,
                    }));
                }
                let value = parse_number(value, line)?;
                builder.set_scalar(name, value).map_err(symbol_err)?;
                trace!(line, name, value, "loaded scalar");
                report.scalars += 1;
            }
            SymbolKind::Array => {
                let len = value.parse::<usize>().map_err(|_| LoadError::InvalidNumber {
                    line,
                    text: value.to_owned(),
                })?;
                if len > MAX_ARRAY_LEN {
                    return Err(LoadError::ArrayTooLong {
                        line,
                        name: name.to_owned(),
                        len,
                    });
                }
                builder.set_array_len(name, len).map_err(symbol_err)?;
                for (index, element) in parse_pairs(rest, line)? {
                    builder
                        .set_element(name, index, element)
                        .map_err(symbol_err)?;
                }
                trace!(line, name, len, "loaded array");
                report.arrays += 1;
            }
        }
    }

    Ok(report)
}

/// Split off the first whitespace-delimited word.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(end) => (&text[..end], &text[end..]),
        None => (text, ""),
    }
}

fn parse_number(text: &str, line: usize) -> Result<f64, LoadError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LoadError::InvalidNumber {
            line,
            text: text.to_owned(),
        }),
    }
}

/// Parse `(i,v) (i,v) ...`; whitespace inside and between pairs is allowed.
fn parse_pairs(text: &str, line: usize) -> Result<Vec<(usize, f64)>, LoadError> {
    let mut pairs = Vec::new();
    let mut rest = text.trim_start();

    while !rest.is_empty() {
        let malformed = || LoadError::MalformedPair {
            line,
            text: rest.split_whitespace().next().unwrap_or(rest).to_owned(),
        };
        let body = rest.strip_prefix('(').ok_or_else(malformed)?;
        let close = body.find(')').ok_or_else(malformed)?;
        let (index, value) = body[..close].split_once(',').ok_or_else(malformed)?;

        let index = index.trim();
        let index = index.parse::<usize>().map_err(|_| LoadError::InvalidNumber {
            line,
            text: index.to_owned(),
        })?;
        let value = parse_number(value.trim(), line)?;
        pairs.push((index, value));

        rest = body[close + 1..].trim_start();
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests;
