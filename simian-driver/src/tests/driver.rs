use std::fs;
use std::path::Path;

use simian_builtins::types::new;
use simian_compiler::{CompErrKind, ParseErrKind, ScanErrKind};
use simian_vm::{RuntimeErrKind, DEFAULT_STACK_SIZE};

use crate::driver::Driver;
use crate::result::{DriverErrKind, DriverResult};

fn execute(source: &str) -> DriverResult {
    let mut driver = Driver::new(DEFAULT_STACK_SIZE, false, false, false);
    driver.execute_text(source)
}

#[test]
fn execute_arithmetic() {
    assert_eq!(execute("4 / 2 * 2 + 10 - 5").unwrap(), Some(new::int(9)));
    assert_eq!(execute("-10 + 30 + -10").unwrap(), Some(new::int(10)));
}

#[test]
fn execute_conditionals() {
    assert_eq!(execute("if (1) { 10 } else { 20 }").unwrap(), Some(new::int(10)));
    assert_eq!(execute("if (1 > 2) { 10 } else { 20 }").unwrap(), Some(new::int(20)));
}

#[test]
fn execute_multiple_statements() {
    let source = "1 + 1\n# comment\n2 * 3;\nif (false) { 1 }\n!(1 < 2)";
    assert_eq!(execute(source).unwrap(), Some(new::false_obj()));
}

#[test]
fn execute_empty() {
    assert_eq!(execute("").unwrap(), None);
}

#[test]
fn if_without_else_has_no_value() {
    assert_eq!(execute("if (false) { 10 }").unwrap(), None);
    assert_eq!(execute("if (true) { 10 }").unwrap(), None);
    assert_eq!(execute("if (5) { }").unwrap(), None);
    assert_eq!(execute("7; if (1 > 2) { 10 }").unwrap(), None);
    assert_eq!(execute("if (1 > 2) { 10 }; 7").unwrap(), Some(new::int(7)));
}

#[test]
fn each_run_is_independent() {
    let mut driver = Driver::new(DEFAULT_STACK_SIZE, true, false, false);
    assert_eq!(driver.execute_repl("1 + 2").unwrap(), Some(new::int(3)));
    assert_eq!(driver.execute_repl("10").unwrap(), Some(new::int(10)));
    let bytecode = driver.bytecode().unwrap();
    assert_eq!(bytecode.constants(), &[new::int(10)]);
}

#[test]
fn scan_error() {
    let err = execute("1 $ 2").unwrap_err();
    assert!(matches!(err.kind, DriverErrKind::ScanErr(ScanErrKind::UnexpectedChar('$'))));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn parse_error() {
    let err = execute("1 +").unwrap_err();
    assert!(matches!(err.kind, DriverErrKind::ParseErr(ParseErrKind::ExpectedExpr(_))));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn incomplete_input_in_repl() {
    let mut driver = Driver::new(DEFAULT_STACK_SIZE, true, false, false);
    let err = driver.execute_repl("if (true) {").unwrap_err();
    assert!(matches!(err.kind, DriverErrKind::ParseErr(ParseErrKind::ExpectedToken(..))));
}

#[test]
fn compilation_error() {
    let err = execute("if (true) { 1 } + 1").unwrap_err();
    assert!(matches!(err.kind, DriverErrKind::CompErr(CompErrKind::ValuelessIf(..))));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn runtime_error() {
    let err = execute("1 + true").unwrap_err();
    assert!(matches!(
        err.kind,
        DriverErrKind::RuntimeErr(RuntimeErrKind::TypeMismatch("+", "Int", "Bool"))
    ));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(err.to_string(), "Runtime error: type mismatch: Int + Bool");
}

#[test]
fn stack_size_is_configurable() {
    let mut driver = Driver::new(1, false, false, false);
    let err = driver.execute_text("1 + 2").unwrap_err();
    assert!(matches!(err.kind, DriverErrKind::RuntimeErr(RuntimeErrKind::StackOverflow(1))));
}

#[test]
fn execute_file() {
    let file_name = format!("simian-driver-test-{}.simian", std::process::id());
    let path = std::env::temp_dir().join(file_name);
    fs::write(&path, "if (2 > 1) { 100 } else { 200 }\n").unwrap();
    let mut driver = Driver::new(DEFAULT_STACK_SIZE, false, false, false);
    let result = driver.execute_file(&path);
    fs::remove_file(&path).unwrap();
    assert_eq!(result.unwrap(), Some(new::int(100)));
}

#[test]
fn execute_missing_file() {
    let mut driver = Driver::new(DEFAULT_STACK_SIZE, false, false, false);
    let err = driver.execute_file(Path::new("/nonexistent/script.simian")).unwrap_err();
    assert!(matches!(err.kind, DriverErrKind::CouldNotReadSourceFile(_)));
    assert_eq!(err.exit_code(), 1);
}
