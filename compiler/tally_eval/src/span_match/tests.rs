#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;
use tally_lexer::tokenize;

fn matched(source: &str, open: usize) -> EvalResult<BracketSpan> {
    let tokens = tokenize(source);
    match_span(tokens.as_slice(), open)
}

#[test]
fn simple_paren_group() {
    let group = matched("(2+3)*4", 0).unwrap();
    assert_eq!(group.delimiter, Delimiter::Paren);
    assert_eq!((group.open, group.close), (0, 4));
    assert_eq!(group.inner.slice("(2+3)*4"), "2+3");
    assert_eq!(group.outer().slice("(2+3)*4"), "(2+3)");
    assert!(!group.is_empty());
}

#[test]
fn nested_same_family() {
    let source = "((1+2)*(3))+4";
    let group = matched(source, 0).unwrap();
    assert_eq!(group.inner.slice(source), "(1+2)*(3)");
}

#[test]
fn families_are_independent() {
    // The `]` inside the paren group does not affect paren depth.
    let source = "(a[(1)]+b[2])";
    let group = matched(source, 0).unwrap();
    assert_eq!(group.close, tokenize(source).len() - 1);

    let inner = matched(source, 2).unwrap();
    assert_eq!(inner.delimiter, Delimiter::Bracket);
    assert_eq!(inner.inner.slice(source), "(1)");
}

#[test]
fn bracket_does_not_close_paren() {
    let err = matched("(1+2]", 0).unwrap_err();
    assert_eq!(
        err,
        EvalError::UnbalancedBracket {
            bracket: '(',
            span: Span::new(0, 1),
        }
    );
}

#[test]
fn exhausted_stream_is_unbalanced() {
    let err = matched("a[[1]", 1).unwrap_err();
    assert!(matches!(
        err,
        EvalError::UnbalancedBracket { bracket: '[', .. }
    ));
}

#[test]
fn search_is_bounded_by_slice() {
    let tokens = tokenize("(a[1)]");
    // Bound the search to the paren group's interior.
    let err = match_span(&tokens.as_slice()[..4], 2).unwrap_err();
    assert!(matches!(err, EvalError::UnbalancedBracket { bracket: '[', .. }));
}

#[test]
fn empty_group() {
    let group = matched("()", 0).unwrap();
    assert!(group.is_empty());
    assert!(group.inner.is_empty());
}

#[test]
fn non_opener_is_malformed() {
    let err = matched("1+2", 1).unwrap_err();
    assert!(matches!(err, EvalError::MalformedExpression { .. }));
    assert!(matches!(
        matched("", 0).unwrap_err(),
        EvalError::MalformedExpression { .. }
    ));
}

#[test]
fn delimiter_characters() {
    assert_eq!(Delimiter::Paren.open(), '(');
    assert_eq!(Delimiter::Paren.close(), ')');
    assert_eq!(Delimiter::Bracket.open(), '[');
    assert_eq!(Delimiter::Bracket.close(), ']');
    assert_eq!(
        Delimiter::of_closer(TokenKind::RBracket),
        Some(Delimiter::Bracket)
    );
    assert_eq!(Delimiter::of_closer(TokenKind::Plus), None);
}
