#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use super::*;
use crate::{discover, SymbolError};
use pretty_assertions::assert_eq;
use std::io::Write;

fn load(expr: &str, table: &str) -> Result<(crate::SymbolTable, LoadReport), LoadError> {
    let mut builder = discover(expr).unwrap();
    let report = load_values(&mut builder, table)?;
    Ok((builder.build(), report))
}

#[test]
fn scalars_and_sparse_arrays() {
    let (table, report) = load("x + a[1]", "x 5\na 3 (0,10) (1,20) (2,30)\n").unwrap();

    assert_eq!(table.scalar("x"), Some(5.0));
    assert_eq!(table.array("a"), Some(&[10.0, 20.0, 30.0][..]));
    assert_eq!(
        report,
        LoadReport {
            scalars: 1,
            arrays: 1,
            skipped: vec![],
        }
    );
}

#[test]
fn unspecified_indices_default_to_zero() {
    let (table, _) = load("a[0]", "a 3 (2,9)").unwrap();
    assert_eq!(table.array("a"), Some(&[0.0, 0.0, 9.0][..]));
}

#[test]
fn array_without_pairs_is_all_zero() {
    let (table, _) = load("a[0]", "a 2").unwrap();
    assert_eq!(table.array("a"), Some(&[0.0, 0.0][..]));
}

#[test]
fn undeclared_names_are_skipped() {
    let (table, report) = load("x", "y 4\nx 1\nb 2 (0,1)").unwrap();
    assert_eq!(table.scalar("x"), Some(1.0));
    assert_eq!(table.lookup("y"), None);
    assert_eq!(report.skipped, vec!["y".to_string(), "b".to_string()]);
}

#[test]
fn blank_lines_and_extra_spacing() {
    let (table, _) = load("x + a[0]", "\n   \n  x   -2.5 \n\ta 2   ( 1 , 7 )(0,3)\n").unwrap();
    assert_eq!(table.scalar("x"), Some(-2.5));
    assert_eq!(table.array("a"), Some(&[3.0, 7.0][..]));
}

#[test]
fn missing_value_is_reported_with_line() {
    let err = load("x", "\nx").unwrap_err();
    assert!(matches!(err, LoadError::MissingValue { line: 2, .. }));
    assert_eq!(err.line(), Some(2));
    assert_eq!(err.to_string(), "line 2: `x` has no value");
}

#[test]
fn invalid_numbers() {
    assert!(matches!(
        load("x", "x five").unwrap_err(),
        LoadError::InvalidNumber { line: 1, .. }
    ));
    assert!(matches!(
        load("x", "x inf").unwrap_err(),
        LoadError::InvalidNumber { .. }
    ));
    assert!(matches!(
        load("a[0]", "a -1").unwrap_err(),
        LoadError::InvalidNumber { .. }
    ));
    assert!(matches!(
        load("a[0]", "a 2 (x,1)").unwrap_err(),
        LoadError::InvalidNumber { .. }
    ));
}

#[test]
fn malformed_pairs() {
    for table in ["a 2 0,1", "a 2 (0,1", "a 2 (01)"] {
        let err = load("a[0]", table).unwrap_err();
        assert!(matches!(err, LoadError::MalformedPair { line: 1, .. }), "{table}: {err}");
    }
}

#[test]
fn pair_past_length_is_rejected() {
    let err = load("a[0]", "a 2 (5,1)").unwrap_err();
    assert!(matches!(
        err,
        LoadError::Symbol {
            line: 1,
            source: SymbolError::ElementOutOfRange { index: 5, len: 2, .. },
        }
    ));
}

#[test]
fn oversized_array_length_is_rejected() {
    for len in [usize::MAX, 10_000_000_000, MAX_ARRAY_LEN + 1] {
        let table = format!("x 1\na {len} (0,1)");
        let err = load("a[0]+x", &table).unwrap_err();
        assert!(
            matches!(&err, LoadError::ArrayTooLong { line: 2, name, len: found } if name == "a" && *found == len),
            "{len}: {err}"
        );
        assert_eq!(err.line(), Some(2));
    }

    let (table, _) = load("a[0]", &format!("a {MAX_ARRAY_LEN}")).unwrap();
    assert_eq!(table.array("a").map(<[f64]>::len), Some(MAX_ARRAY_LEN));
}

#[test]
fn pairs_on_a_scalar_are_rejected() {
    let err = load("x", "x 3 (0,1)").unwrap_err();
    assert!(matches!(
        err,
        LoadError::Symbol {
            source: SymbolError::KindMismatch { .. },
            ..
        }
    ));
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "x 8").unwrap();

    let mut builder = discover("x").unwrap();
    let report = load_values_from_path(&mut builder, file.path()).unwrap();
    assert_eq!(report.scalars, 1);
    assert_eq!(builder.build().scalar("x"), Some(8.0));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut builder = SymbolTableBuilder::new();
    let err = load_values_from_path(&mut builder, dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert_eq!(err.line(), None);
}
