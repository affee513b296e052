//! End-to-end rejection of invalid documents

use rstest::rstest;
use toml_reader::{read_toml, AssemblyErrorKind, TomlError};

fn errors(text: &str) -> Vec<TomlError> {
    let outcome = read_toml(text, false);
    assert!(
        outcome.result.is_none(),
        "expected rejection of {text:?}, got {:?}",
        outcome.result
    );
    assert!(!outcome.errors.is_empty());
    outcome.errors
}

fn assembly_kind(text: &str) -> AssemblyErrorKind {
    match errors(text).remove(0) {
        TomlError::Assembly(err) => err.kind,
        other => panic!("expected an assembly error for {text:?}, got {other}"),
    }
}

#[rstest]
#[case("x = 1\nx = 2\n")]
#[case("[t]\nx = 1\nx = 2\n")]
#[case("a.b = 1\na.b = 2\n")]
fn duplicate_keys(#[case] text: &str) {
    assert_eq!(assembly_kind(text), AssemblyErrorKind::PathAlreadyValue);
}

#[test]
fn repeated_table_header() {
    assert_eq!(
        assembly_kind("[fruit]\napple = 1\n[fruit]\norange = 2\n"),
        AssemblyErrorKind::DirectRedefinition
    );
}

#[test]
fn redefining_an_inline_table() {
    assert_eq!(
        assembly_kind("a = { b = 1 }\n[a]\nc = 2\n"),
        AssemblyErrorKind::DirectRedefinition
    );
}

#[test]
fn key_path_through_an_atomic_value() {
    assert_eq!(
        assembly_kind("a = false\na.b = 1\n"),
        AssemblyErrorKind::PathAlreadyValue
    );
}

#[test]
fn table_header_over_a_table_array() {
    assert_eq!(assembly_kind("[[a]]\n[a]\n"), AssemblyErrorKind::PathAlreadyTableArray);
}

#[test]
fn static_array_extended_by_header() {
    assert_eq!(
        assembly_kind("fruit = [{ name = \"apple\" }]\n[[fruit]]\n"),
        AssemblyErrorKind::StaticTableArrayConflict
    );
}

#[rstest]
#[case("a = [1, 2.5]\n")]
#[case("a = [\"one\", 1]\n")]
#[case("a = [1979-05-27, 1979-05-27T07:32:00]\n")]
#[case("a = [[1], {}]\n")]
fn heterogeneous_arrays(#[case] text: &str) {
    assert_eq!(assembly_kind(text), AssemblyErrorKind::ArrayTypeMismatch);
}

#[rstest]
#[case("s = \"\\uD800\"\n", "surrogate")]
#[case("s = \"\\UFFFFFFFF\"\n", "U+10FFFF")]
#[case("s = \"never closed", "unexpected character")]
#[case("s = \"\"\"never closed\n", "unterminated")]
#[case("a = [1, 2", "unterminated")]
fn scanner_rejections(#[case] text: &str, #[case] needle: &str) {
    match errors(text).remove(0) {
        TomlError::Lex(err) => {
            assert!(err.message.contains(needle), "message: {}", err.message)
        }
        other => panic!("expected a lexing error for {text:?}, got {other}"),
    }
}

#[rstest]
#[case("x =\n")]
#[case("x 1\n")]
#[case("[header] trailing = 1\n")]
#[case("p = { x = 1, }\n")]
#[case("[a.]\n")]
#[case("a. = 1\n")]
fn parser_rejections(#[case] text: &str) {
    assert!(matches!(errors(text).remove(0), TomlError::Parse(_)));
}

#[rstest]
#[case("d = 2021-02-29\n")]
#[case("d = 2021-13-01\n")]
#[case("t = 25:00:00\n")]
#[case("t = 00:61:00\n")]
fn calendar_rejections(#[case] text: &str) {
    assert!(matches!(errors(text).remove(0), TomlError::Parse(_)));
}

#[test]
fn integer_overflow() {
    assert!(matches!(
        errors("big = 9_223_372_036_854_775_808\n").remove(0),
        TomlError::Parse(_)
    ));
}

#[test]
fn errors_never_come_with_a_result() {
    let outcome = read_toml("x = 1\nx = 2\n", true);
    assert!(outcome.result.is_none());
    assert!(!outcome.errors.is_empty());
}

#[test]
fn later_stages_do_not_run_after_a_lex_error() {
    // the duplicate key would be an assembly conflict, the unterminated
    // string wins
    let outcome = read_toml("x = 1\nx = 2\ns = \"oops", false);
    assert!(matches!(outcome.errors[0], TomlError::Lex(_)));
    assert!(outcome.entries.is_empty());
}
