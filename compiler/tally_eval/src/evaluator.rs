//! Recursive evaluator over a flat token list.
//!
//! No tree is built. Precedence comes from two loops over the token cursor:
//!
//! ```text
//! expr     := term (('+' | '-') term)*
//! term     := factor (('*' | '/') factor)*
//! factor   := number | scalar | array '[' expr ']' | '(' expr ')'
//! ```
//!
//! A group (`(...)` or `[...]`) is located with [`match_span`], and its
//! interior token range is evaluated by a fresh recursive call that must
//! consume the whole range. Each such descent runs under
//! [`ensure_sufficient_stack`], so nesting depth is not bounded by the thread
//! stack. Running time is not: every level rescans its group with
//! [`match_span`], which makes evaluation `O(tokens * depth)`.

use tally_lexer::{Span, Token, TokenKind};
use tally_stack::ensure_sufficient_stack;
use tally_symbols::{Symbol, SymbolTable};
use tracing::{trace, warn};

use crate::operators::{evaluate_binary, BinaryOp};
use crate::span_match::{match_span, BracketSpan, Delimiter};
use crate::{EvalConfig, EvalError, EvalResult, IndexPolicy};

/// A lenient out-of-range subscript that evaluated to `0`.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexAnomaly {
    pub array: String,
    /// Subscript value before truncation.
    pub index: f64,
    pub len: usize,
    /// `name[...]` in the normalized expression.
    pub span: Span,
}

/// Position within one token range. Local to a single recursive call.
#[derive(Copy, Clone, Debug)]
struct Cursor {
    pos: usize,
    end: usize,
}

pub(crate) struct Evaluator<'a> {
    source: &'a str,
    tokens: &'a [Token],
    symbols: &'a SymbolTable,
    config: EvalConfig,
    anomalies: Vec<IndexAnomaly>,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(
        source: &'a str,
        tokens: &'a [Token],
        symbols: &'a SymbolTable,
        config: EvalConfig,
    ) -> Self {
        Evaluator {
            source,
            tokens,
            symbols,
            config,
            anomalies: Vec::new(),
        }
    }

    pub(crate) fn into_anomalies(self) -> Vec<IndexAnomaly> {
        self.anomalies
    }

    /// Evaluate the whole token list.
    pub(crate) fn eval_all(&mut self) -> EvalResult<f64> {
        self.eval_range(0, self.tokens.len())
    }

    /// Evaluate `tokens[start..end]` as one complete expression.
    fn eval_range(&mut self, start: usize, end: usize) -> EvalResult<f64> {
        let mut cursor = Cursor { pos: start, end };
        let value = self.eval_expr(&mut cursor)?;

        if let Some(token) = self.peek(cursor) {
            return Err(self.unexpected(token));
        }
        Ok(value)
    }

    fn eval_expr(&mut self, cursor: &mut Cursor) -> EvalResult<f64> {
        let mut lhs = self.eval_term(cursor)?;

        while let Some((op, op_token)) = self.next_op(*cursor, BinaryOp::additive) {
            cursor.pos += 1;
            let rhs = self.eval_term(cursor)?;
            lhs = self.combine(lhs, rhs, op, op_token, *cursor)?;
        }
        Ok(lhs)
    }

    fn eval_term(&mut self, cursor: &mut Cursor) -> EvalResult<f64> {
        let mut lhs = self.eval_factor(cursor)?;

        while let Some((op, op_token)) = self.next_op(*cursor, BinaryOp::multiplicative) {
            cursor.pos += 1;
            let rhs = self.eval_factor(cursor)?;
            lhs = self.combine(lhs, rhs, op, op_token, *cursor)?;
        }
        Ok(lhs)
    }

    fn eval_factor(&mut self, cursor: &mut Cursor) -> EvalResult<f64> {
        let Some(token) = self.peek(*cursor) else {
            return Err(EvalError::malformed(
                "expected an operand",
                Span::point(self.offset_at(cursor.end)),
            ));
        };
        cursor.pos += 1;

        match token.kind {
            TokenKind::Number(value) => {
                trace!(value, "literal");
                Ok(value)
            }
            TokenKind::Ident => self.eval_identifier(token, cursor),
            TokenKind::LParen => {
                let group = self.group_at(cursor.pos - 1, *cursor)?;
                cursor.pos = group.close + 1;
                self.eval_group(group)
            }
            TokenKind::LBracket => Err(EvalError::malformed(
                "subscript without an array name",
                token.span,
            )),
            TokenKind::Invalid => Err(EvalError::malformed(
                format!("`{}` is not a number or identifier", token.text(self.source)),
                token.span,
            )),
            kind if kind.is_closer() => Err(self.unexpected(token)),
            // `+ - * /`
            kind => Err(EvalError::malformed(
                format!("expected an operand, found {}", kind.display_name()),
                token.span,
            )),
        }
    }

    /// Scalar lookup, or array subscript when a `[` follows.
    fn eval_identifier(&mut self, token: Token, cursor: &mut Cursor) -> EvalResult<f64> {
        let source = self.source;
        let symbols = self.symbols;
        let name = token.text(source);
        let subscripted = self
            .peek(*cursor)
            .is_some_and(|next| next.kind == TokenKind::LBracket);

        match symbols.lookup(name) {
            None => Err(EvalError::UnknownIdentifier {
                name: name.to_owned(),
                span: token.span,
            }),
            Some(Symbol::Scalar(value)) if !subscripted => {
                trace!(name, value, "scalar");
                Ok(value)
            }
            Some(Symbol::Scalar(_)) => Err(EvalError::malformed(
                format!("`{name}` is a scalar and cannot be subscripted"),
                token.span,
            )),
            Some(Symbol::Array(_)) if !subscripted => Err(EvalError::malformed(
                format!("array `{name}` must be subscripted"),
                token.span,
            )),
            Some(Symbol::Array(values)) => {
                let group = self.group_at(cursor.pos, *cursor)?;
                cursor.pos = group.close + 1;
                let index = self.eval_group(group)?;
                let span = token.span.merge(group.outer());
                self.element(name, values, index, span)
            }
        }
    }

    /// Evaluate the interior of a matched group.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(delimiter = ?group.delimiter, inner = group.inner.slice(self.source))
    )]
    fn eval_group(&mut self, group: BracketSpan) -> EvalResult<f64> {
        ensure_sufficient_stack(|| self.eval_range(group.open + 1, group.close))
    }

    /// Read `values` at `index` truncated toward zero, applying the index policy.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "subscript is checked finite and non-negative; huge values saturate and miss"
    )]
    fn element(&mut self, name: &str, values: &[f64], index: f64, span: Span) -> EvalResult<f64> {
        let truncated = index.trunc();
        let slot = if truncated.is_finite() && truncated >= 0.0 {
            values.get(truncated as usize).copied()
        } else {
            None
        };

        if let Some(value) = slot {
            trace!(name, index = truncated, value, "element");
            return Ok(value);
        }

        match self.config.index_policy {
            IndexPolicy::Strict => Err(EvalError::ArrayIndexOutOfRange {
                name: name.to_owned(),
                index,
                len: values.len(),
                span,
            }),
            IndexPolicy::Lenient => {
                warn!(
                    array = name,
                    index,
                    len = values.len(),
                    %span,
                    "array index out of range, using 0"
                );
                self.anomalies.push(IndexAnomaly {
                    array: name.to_owned(),
                    index,
                    len: values.len(),
                    span,
                });
                Ok(0.0)
            }
        }
    }

    fn combine(
        &self,
        lhs: f64,
        rhs: f64,
        op: BinaryOp,
        op_token: Token,
        cursor: Cursor,
    ) -> EvalResult<f64> {
        // The right operand ends just before the cursor.
        let rhs_end = self
            .tokens
            .get(cursor.pos.saturating_sub(1))
            .map_or(op_token.span, |t| t.span);
        let result = evaluate_binary(lhs, rhs, op, op_token.span.merge(rhs_end))?;
        trace!(lhs, op = %op.symbol(), rhs, result, "combine");
        Ok(result)
    }

    /// Locate the group opened at `tokens[open]`, searching only the current range.
    fn group_at(&self, open: usize, cursor: Cursor) -> EvalResult<BracketSpan> {
        match_span(&self.tokens[..cursor.end], open)
    }

    fn next_op(
        &self,
        cursor: Cursor,
        level: fn(TokenKind) -> Option<BinaryOp>,
    ) -> Option<(BinaryOp, Token)> {
        let token = self.peek(cursor)?;
        level(token.kind).map(|op| (op, token))
    }

    fn peek(&self, cursor: Cursor) -> Option<Token> {
        if cursor.pos < cursor.end {
            self.tokens.get(cursor.pos).copied()
        } else {
            None
        }
    }

    /// Leftover token after a complete expression.
    fn unexpected(&self, token: Token) -> EvalError {
        match Delimiter::of_closer(token.kind) {
            Some(delimiter) => EvalError::UnbalancedBracket {
                bracket: delimiter.close(),
                span: token.span,
            },
            None => EvalError::malformed(
                format!(
                    "expected an operator, found {}",
                    token.kind.display_name()
                ),
                token.span,
            ),
        }
    }

    /// Character offset where token `index` starts, or the end of the source.
    fn offset_at(&self, index: usize) -> u32 {
        self.tokens.get(index).map_or_else(
            || u32::try_from(self.source.len()).unwrap_or(u32::MAX),
            |t| t.span.start,
        )
    }
}
