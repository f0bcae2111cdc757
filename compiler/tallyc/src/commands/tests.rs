#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    reason = "Tests can panic"
)]

use std::io::Write;
use std::path::Path;

use super::*;
use pretty_assertions::assert_eq;
use tally_eval::ErrorKind;
use tempfile::NamedTempFile;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// === Option parsing ===

#[test]
fn eval_args_join_words() {
    let (expr, options) = parse_eval_args(&args(&["2", "+", "3"])).unwrap();
    assert_eq!(expr, "2 + 3");
    assert_eq!(options, EvalOptions::default());
}

#[test]
fn eval_args_flags() {
    let (expr, options) =
        parse_eval_args(&args(&["--strict-index", "a[1]", "--values=v.txt"])).unwrap();
    assert_eq!(expr, "a[1]");
    assert_eq!(
        options,
        EvalOptions {
            values: Some(PathBuf::from("v.txt")),
            config: EvalConfig::strict(),
        }
    );
}

#[test]
fn eval_args_errors() {
    assert!(matches!(
        parse_eval_args(&args(&["--values=v.txt"])),
        Err(CommandError::Usage(_))
    ));
    assert!(matches!(
        parse_eval_args(&args(&["1", "--fast"])),
        Err(CommandError::Usage(message)) if message.contains("--fast")
    ));
}

#[test]
fn batch_args() {
    let (path, options) =
        parse_batch_args(&args(&["exprs.txt", "--values=v.txt", "--no-parallel"])).unwrap();
    assert_eq!(path, PathBuf::from("exprs.txt"));
    assert_eq!(
        options,
        BatchOptions {
            values: PathBuf::from("v.txt"),
            config: EvalConfig::default(),
            parallel: false,
        }
    );
}

#[test]
fn batch_args_require_values() {
    assert!(matches!(
        parse_batch_args(&args(&["exprs.txt"])),
        Err(CommandError::Usage(message)) if message.contains("--values")
    ));
    assert!(matches!(
        parse_batch_args(&args(&["a.txt", "b.txt", "--values=v"])),
        Err(CommandError::Usage(_))
    ));
}

// === eval ===

#[test]
fn eval_without_values_uses_zero() {
    let output = eval_expression("x+2", &EvalOptions::default()).unwrap();
    assert_eq!(output.evaluation.value, 2.0);
}

#[test]
fn eval_with_values_file() {
    let values = temp_file("x 5\na 3 (0,1) (1,2) (2,3)\nb 3 (0,5) (1,6) (2,7)\n");
    let options = EvalOptions {
        values: Some(values.path().to_path_buf()),
        ..EvalOptions::default()
    };
    assert_eq!(
        eval_expression("a[b[0]-4]", &options).unwrap().evaluation.value,
        2.0
    );
    assert_eq!(
        eval_expression("x * 2 + 1", &options).unwrap().evaluation.value,
        11.0
    );
}

#[test]
fn eval_reports_anomalies_and_strict_errors() {
    let values = temp_file("a 3 (0,10) (1,20) (2,30)\n");
    let mut options = EvalOptions {
        values: Some(values.path().to_path_buf()),
        ..EvalOptions::default()
    };

    let output = eval_expression("a [ 5 ]", &options).unwrap();
    assert_eq!(output.source, "a[5]");
    assert_eq!(output.evaluation.value, 0.0);
    assert_eq!(output.evaluation.anomalies.len(), 1);

    options.config = EvalConfig::strict();
    match eval_expression("a[5]", &options) {
        Err(CommandError::Eval { expr, error }) => {
            assert_eq!(expr, "a[5]");
            assert_eq!(error.kind(), ErrorKind::ArrayIndexOutOfRange);
        }
        other => panic!("expected an evaluation error, got {other:?}"),
    }
}

#[test]
fn eval_conflicting_usage_is_a_symbol_error() {
    assert!(matches!(
        eval_expression("a+a[0]", &EvalOptions::default()),
        Err(CommandError::Symbol(_))
    ));
}

#[test]
fn eval_missing_values_file() {
    let options = EvalOptions {
        values: Some(PathBuf::from("/nonexistent/tally/values.txt")),
        ..EvalOptions::default()
    };
    assert!(matches!(
        eval_expression("x", &options),
        Err(CommandError::Load(_))
    ));
}

// === symbols and lex ===

#[test]
fn symbols_listing() {
    let values = temp_file("x 2.5\nunused 1\na 2 (1,4)\n");
    let output = collect_symbols("a[x]+x*i", Some(values.path())).unwrap();
    assert_eq!(output.skipped, vec!["unused".to_string()]);
    assert_eq!(format_symbols(&output.table), "i = 0\nx = 2.5\na[2] = [0, 4]\n");
}

#[test]
fn symbols_without_values() {
    let output = collect_symbols("b[0]", None).unwrap();
    assert!(output.skipped.is_empty());
    assert_eq!(format_symbols(&output.table), "b[0] = []\n");
}

#[test]
fn token_listing() {
    assert_eq!(
        format_tokens("2 + x"),
        "Tokens for `2+x` (3 tokens):\n  Number(2.0) @ 0..1\n  Plus @ 1..2\n  Ident @ 2..3\n"
    );
}

// === batch ===

fn run_batch(exprs: &str, values: &Path, parallel: bool) -> Vec<BatchLine> {
    let file = temp_file(exprs);
    let options = BatchOptions {
        values: values.to_path_buf(),
        config: EvalConfig::default(),
        parallel,
    };
    evaluate_batch(file.path(), &options).unwrap()
}

#[test]
fn batch_keeps_order_and_skips_blank_lines() {
    let values = temp_file("x 4\na 2 (0,3) (1,7)\n");
    let lines = run_batch("x*2\n\n a[1] - x \n5/0\ny+a[0]\n", values.path(), true);

    let summary: Vec<(usize, &str)> = lines
        .iter()
        .map(|line| (line.line, line.source.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![(1, "x*2"), (3, "a[1]-x"), (4, "5/0"), (5, "y+a[0]")]
    );

    assert_eq!(lines[0].result.as_ref().unwrap().value, 8.0);
    assert_eq!(lines[1].result.as_ref().unwrap().value, 3.0);
    assert_eq!(
        lines[2].result.as_ref().unwrap_err().kind(),
        ErrorKind::DivisionByZero
    );
    // `y` is declared by discovery, so it reads as 0.
    assert_eq!(lines[3].result.as_ref().unwrap().value, 3.0);
}

#[test]
fn batch_parallel_matches_sequential() {
    let values = temp_file("x 3\nv 4 (0,1) (1,2) (2,3) (3,4)\n");
    let exprs: String = (0..200)
        .map(|i| format!("v[{}]*x+{i}/(x-{})\n", i % 6, i % 4))
        .collect();

    let parallel = run_batch(&exprs, values.path(), true);
    let sequential = run_batch(&exprs, values.path(), false);
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.len(), 200);
}

#[test]
fn batch_conflict_names_the_line() {
    let values = temp_file("");
    let file = temp_file("a[0]\n\na+1\n");
    let options = BatchOptions {
        values: values.path().to_path_buf(),
        config: EvalConfig::default(),
        parallel: true,
    };
    match evaluate_batch(file.path(), &options) {
        Err(CommandError::BatchSymbol { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected a symbol conflict, got {other:?}"),
    }
}
