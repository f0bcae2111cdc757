//! Diagnostic rendering.
//!
//! Evaluation errors and anomalies are rendered as plain text:
//!
//! ```text
//! error[E1003]: division by zero
//!   --> 1..3 (DivisionByZero)
//!    |
//!    | 5/0
//!    |  ^^
//! ```
//!
//! Spans index the normalized expression, so the normalized text is what gets
//! shown above the caret line.

use std::fmt::Write;

use tally_eval::{ErrorCode, ErrorKind, EvalError, IndexAnomaly};
use tally_lexer::Span;

/// Render a fatal evaluation error against `source`.
pub fn render_error(source: &str, error: &EvalError) -> String {
    render(
        "error",
        error.code().as_str(),
        &error.to_string(),
        error.kind().as_str(),
        source,
        error.span(),
    )
}

/// Render a lenient out-of-range subscript as a warning.
pub fn render_anomaly(source: &str, anomaly: &IndexAnomaly) -> String {
    let message = format!(
        "index {} is out of range for array `{}` of length {}, read as 0",
        anomaly.index, anomaly.array, anomaly.len
    );
    render(
        "warning",
        ErrorCode::E1004.as_str(),
        &message,
        ErrorKind::ArrayIndexOutOfRange.as_str(),
        source,
        anomaly.span,
    )
}

fn render(
    severity: &str,
    code: &str,
    message: &str,
    kind: &str,
    source: &str,
    span: Span,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{severity}[{code}]: {message}");
    let _ = writeln!(out, "  --> {span} ({kind})");
    let _ = writeln!(out, "   |");
    let _ = writeln!(out, "   | {source}");
    let _ = writeln!(out, "   | {}", caret_line(source, span));
    out
}

/// Spaces up to `span.start`, then one `^` per character of the span.
///
/// An empty span (end of input) gets a single caret.
pub fn caret_line(source: &str, span: Span) -> String {
    let range = span.to_range();
    let column = source
        .get(..range.start)
        .map_or(range.start, |prefix| prefix.chars().count());
    let width = source
        .get(range.clone())
        .map_or(range.len(), |text| text.chars().count())
        .max(1);

    let mut line = " ".repeat(column);
    line.push_str(&"^".repeat(width));
    line
}
