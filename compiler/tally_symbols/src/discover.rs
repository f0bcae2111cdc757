//! Symbol discovery: which names does an expression use, and how?
//!
//! An identifier immediately followed by `[` is an array; every other
//! identifier is a scalar. Whitespace is stripped first, exactly as the
//! evaluator does, so `a [0]` is an array reference in both places.

use tally_lexer::{normalize, tokenize, TokenKind};
use tracing::debug;

use crate::{SymbolError, SymbolTableBuilder};

/// Declare every name referenced by `expr` in a fresh builder.
pub fn discover(expr: &str) -> Result<SymbolTableBuilder, SymbolError> {
    let mut builder = SymbolTableBuilder::new();
    discover_into(&mut builder, expr)?;
    Ok(builder)
}

/// Declare every name referenced by `expr` in an existing builder.
///
/// Used when several expressions share one table.
pub fn discover_into(builder: &mut SymbolTableBuilder, expr: &str) -> Result<(), SymbolError> {
    let source = normalize(expr);
    let tokens = tokenize(&source);
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        if token.kind != TokenKind::Ident {
            continue;
        }
        let name = token.text(&source);
        let subscripted = iter
            .peek()
            .is_some_and(|next| next.kind == TokenKind::LBracket);
        if subscripted {
            builder.declare_array(name)?;
        } else {
            builder.declare_scalar(name)?;
        }
        debug!(name, subscripted, "discovered symbol");
    }
    Ok(())
}
