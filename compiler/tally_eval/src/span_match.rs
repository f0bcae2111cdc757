//! Bracket group matching over a token slice.
//!
//! Given the index of an opening `(` or `[`, find its matching closer by
//! depth counting. The two families are independent: only `(`/`)` move the
//! depth of a paren group, only `[`/`]` move the depth of a bracket group.
//!
//! The result is expressed in token indices, so the caller evaluates
//! `open + 1..close` and resumes at `close + 1` without any character
//! arithmetic.

use tally_lexer::{Span, Token, TokenKind};
use tracing::trace;

use crate::{EvalError, EvalResult};

/// Bracket family.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Delimiter {
    /// `( ... )`
    Paren,
    /// `[ ... ]`
    Bracket,
}

impl Delimiter {
    /// Family of an opening token kind.
    pub fn of_opener(kind: TokenKind) -> Option<Delimiter> {
        match kind {
            TokenKind::LParen => Some(Delimiter::Paren),
            TokenKind::LBracket => Some(Delimiter::Bracket),
            _ => None,
        }
    }

    /// Family of a closing token kind.
    pub fn of_closer(kind: TokenKind) -> Option<Delimiter> {
        match kind {
            TokenKind::RParen => Some(Delimiter::Paren),
            TokenKind::RBracket => Some(Delimiter::Bracket),
            _ => None,
        }
    }

    pub fn open(self) -> char {
        match self {
            Delimiter::Paren => '(',
            Delimiter::Bracket => '[',
        }
    }

    pub fn close(self) -> char {
        match self {
            Delimiter::Paren => ')',
            Delimiter::Bracket => ']',
        }
    }

    fn open_kind(self) -> TokenKind {
        match self {
            Delimiter::Paren => TokenKind::LParen,
            Delimiter::Bracket => TokenKind::LBracket,
        }
    }

    fn close_kind(self) -> TokenKind {
        match self {
            Delimiter::Paren => TokenKind::RParen,
            Delimiter::Bracket => TokenKind::RBracket,
        }
    }
}

/// A balanced group located by [`match_span`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct BracketSpan {
    pub delimiter: Delimiter,
    /// Token index of the opener.
    pub open: usize,
    /// Token index of the matching closer.
    pub close: usize,
    /// Characters strictly between opener and closer.
    pub inner: Span,
}

impl BracketSpan {
    /// Whether the group encloses no tokens (`()`, `[]`).
    pub fn is_empty(&self) -> bool {
        self.close == self.open + 1
    }

    /// Characters of the group including both delimiters.
    pub fn outer(&self) -> Span {
        Span::new(
            self.inner.start.saturating_sub(1),
            self.inner.end.saturating_add(1),
        )
    }
}

/// Find the closer matching the opener at `tokens[open]`.
///
/// Only `tokens` is searched; callers pass the slice bounded by their own
/// group so an inner mismatch cannot borrow an outer closer.
pub fn match_span(tokens: &[Token], open: usize) -> EvalResult<BracketSpan> {
    let opener = tokens
        .get(open)
        .ok_or_else(|| EvalError::malformed("expected `(` or `[`", Span::default()))?;
    let delimiter = Delimiter::of_opener(opener.kind).ok_or_else(|| {
        EvalError::malformed(
            format!("expected `(` or `[`, found {}", opener.kind.display_name()),
            opener.span,
        )
    })?;

    let mut depth = 1usize;
    for (index, token) in tokens.iter().enumerate().skip(open + 1) {
        if token.kind == delimiter.open_kind() {
            depth += 1;
        } else if token.kind == delimiter.close_kind() {
            depth -= 1;
            if depth == 0 {
                trace!(open, close = index, ?delimiter, "matched group");
                return Ok(BracketSpan {
                    delimiter,
                    open,
                    close: index,
                    inner: Span::new(opener.span.end, token.span.start),
                });
            }
        }
    }

    Err(EvalError::UnbalancedBracket {
        bracket: delimiter.open(),
        span: opener.span,
    })
}

#[cfg(test)]
mod tests;
