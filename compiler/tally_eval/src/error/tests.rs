use super::*;

#[test]
fn codes_follow_kinds() {
    let cases = [
        (
            EvalError::UnknownIdentifier {
                name: "y".into(),
                span: Span::new(0, 1),
            },
            ErrorKind::UnknownIdentifier,
            "E1001",
        ),
        (
            EvalError::UnbalancedBracket {
                bracket: '(',
                span: Span::new(0, 1),
            },
            ErrorKind::UnbalancedBracket,
            "E1002",
        ),
        (
            EvalError::DivisionByZero {
                span: Span::new(1, 3),
            },
            ErrorKind::DivisionByZero,
            "E1003",
        ),
        (
            EvalError::ArrayIndexOutOfRange {
                name: "a".into(),
                index: 5.0,
                len: 3,
                span: Span::new(0, 4),
            },
            ErrorKind::ArrayIndexOutOfRange,
            "E1004",
        ),
        (
            EvalError::malformed("expected operand", Span::point(2)),
            ErrorKind::MalformedExpression,
            "E1005",
        ),
    ];

    for (error, kind, code) in cases {
        assert_eq!(error.kind(), kind);
        assert_eq!(error.code().as_str(), code);
        assert_eq!(error.code().to_string(), code);
    }
}

#[test]
fn messages() {
    let err = EvalError::ArrayIndexOutOfRange {
        name: "a".into(),
        index: 5.0,
        len: 3,
        span: Span::new(0, 4),
    };
    assert_eq!(
        err.to_string(),
        "index 5 is out of range for array `a` of length 3"
    );
    assert_eq!(err.span(), Span::new(0, 4));
    assert_eq!(
        EvalError::UnbalancedBracket {
            bracket: '[',
            span: Span::new(1, 2)
        }
        .to_string(),
        "unbalanced `[`"
    );
    assert_eq!(ErrorKind::DivisionByZero.to_string(), "DivisionByZero");
}
