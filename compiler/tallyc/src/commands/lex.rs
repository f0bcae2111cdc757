//! `tally lex`: display the token stream.

use std::fmt::Write;

use tally_lexer::{normalize, tokenize};

/// Tokens of the normalized expression, one `Kind @ start..end` per line.
pub fn format_tokens(expr: &str) -> String {
    let source = normalize(expr);
    let tokens = tokenize(&source);

    let mut out = String::new();
    let _ = writeln!(out, "Tokens for `{source}` ({} tokens):", tokens.len());
    for token in &tokens {
        let _ = writeln!(out, "  {token:?}");
    }
    out
}
