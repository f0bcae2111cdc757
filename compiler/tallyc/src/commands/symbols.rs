//! `tally symbols`: show what an expression refers to.

use std::fmt::Write;
use std::path::Path;

use tally_symbols::{discover, load_values_from_path, SymbolTable};

use super::CommandError;

#[derive(Clone, Debug)]
pub struct SymbolsOutput {
    pub table: SymbolTable,
    /// Names in the values file that `expr` never uses.
    pub skipped: Vec<String>,
}

pub fn collect_symbols(expr: &str, values: Option<&Path>) -> Result<SymbolsOutput, CommandError> {
    let mut builder = discover(expr)?;
    let skipped = match values {
        Some(path) => load_values_from_path(&mut builder, path)?.skipped,
        None => Vec::new(),
    };
    Ok(SymbolsOutput {
        table: builder.build(),
        skipped,
    })
}

/// One line per symbol, scalars first, each group sorted by name.
pub fn format_symbols(table: &SymbolTable) -> String {
    let mut out = String::new();
    for (name, value) in table.scalars() {
        let _ = writeln!(out, "{name} = {value}");
    }
    for (name, values) in table.arrays() {
        let elements: Vec<String> = values.iter().map(ToString::to_string).collect();
        let _ = writeln!(
            out,
            "{name}[{}] = [{}]",
            values.len(),
            elements.join(", ")
        );
    }
    out
}
