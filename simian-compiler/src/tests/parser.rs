use simian_util::source::Location;

use crate::ast;
use crate::parser::*;
use crate::scanner::{ScanErrKind, Token};

fn parse_ok(text: &str) -> ast::Program {
    let result = parse_text(text);
    assert!(result.is_ok(), "{result:?}");
    result.unwrap()
}

fn assert_parses_to(text: &str, expected: &str) {
    assert_eq!(parse_ok(text).to_string(), expected);
}

#[test]
fn parse_empty() {
    let program = parse_ok("");
    assert!(program.statements.is_empty());
    let program = parse_ok(";;");
    assert!(program.statements.is_empty());
}

#[test]
fn parse_int() {
    let program = parse_ok("42");
    assert_eq!(program.statements.len(), 1);
    let expected = ast::Expr::new_int(42, Location::new(1, 1), Location::new(1, 2));
    assert_eq!(program.statements[0].expr(), Some(&expected));
}

#[test]
fn parse_precedence() {
    assert_parses_to("1 + 2 * 3", "(1 + (2 * 3))");
    assert_parses_to("1 * 2 + 3", "((1 * 2) + 3)");
    assert_parses_to("5 - 3 - 1", "((5 - 3) - 1)");
    assert_parses_to("8 / 4 / 2", "((8 / 4) / 2)");
    assert_parses_to("(1 + 2) * 3", "((1 + 2) * 3)");
    assert_parses_to("1 < 2 == true", "((1 < 2) == true)");
    assert_parses_to("1 + 2 > 2 != false", "(((1 + 2) > 2) != false)");
}

#[test]
fn parse_prefix() {
    assert_parses_to("-1 * 2", "((-1) * 2)");
    assert_parses_to("!true == false", "((!true) == false)");
    assert_parses_to("--1", "(-(-1))");
    assert_parses_to("-(1 + 2)", "(-(1 + 2))");
}

#[test]
fn parse_statements() {
    let program = parse_ok("1; 2\n3");
    assert_eq!(program.statements.len(), 3);
    assert_eq!(program.to_string(), "1; 2; 3");
}

#[test]
fn parse_if_else() {
    let program = parse_ok("if (1 > 2) { 10 } else { 20; 30 }");
    assert_eq!(program.to_string(), "if (1 > 2) { 10 } else { 20; 30 }");
    let expr = program.statements[0].expr().unwrap();
    assert_eq!(expr.start, Location::new(1, 1));
    assert_eq!(expr.end, Location::new(1, 33));
    match &expr.kind {
        ast::ExprKind::If(if_expr) => {
            assert_eq!(if_expr.consequence.statements.len(), 1);
            assert_eq!(if_expr.alternative.as_ref().map(|b| b.statements.len()), Some(2));
        }
        kind => panic!("Expected if expression; got {kind:?}"),
    }
}

#[test]
fn parse_if_without_else() {
    let program = parse_ok("if (true) { 10 }");
    let expr = program.statements[0].expr().unwrap();
    assert!(expr.is_valueless_if());
    assert_eq!(expr.end, Location::new(1, 16));
}

#[test]
fn parse_empty_block() {
    let program = parse_ok("if (true) { } else { 1 }");
    let expr = program.statements[0].expr().unwrap();
    match &expr.kind {
        ast::ExprKind::If(if_expr) => {
            assert!(if_expr.consequence.statements.is_empty());
            assert!(!if_expr.consequence.yields_value());
        }
        kind => panic!("Expected if expression; got {kind:?}"),
    }
}

#[test]
fn program_yields_value() {
    assert!(parse_ok("1; 2").yields_value());
    assert!(parse_ok("if (true) { 1 } else { 2 }").yields_value());
    assert!(!parse_ok("1; if (true) { 1 }").yields_value());
    assert!(!parse_ok("").yields_value());
}

#[test]
fn parse_missing_rhs() {
    let err = parse_text("1 +").unwrap_err();
    assert_eq!(err.kind, ParseErrKind::ExpectedExpr(Location::new(1, 4)));
}

#[test]
fn parse_unclosed_group() {
    let err = parse_text("(1").unwrap_err();
    match err.kind {
        ParseErrKind::ExpectedToken(Token::RParen, found) => {
            assert_eq!(found.token, Token::EndOfInput);
        }
        kind => panic!("Expected ExpectedToken error; got {kind:?}"),
    }
}

#[test]
fn parse_unclosed_block() {
    let err = parse_text("if (true) { 1").unwrap_err();
    match err.kind {
        ParseErrKind::ExpectedToken(Token::RBrace, found) => {
            assert_eq!(found.token, Token::EndOfInput);
            assert_eq!(found.start, Location::new(1, 14));
        }
        kind => panic!("Expected ExpectedToken error; got {kind:?}"),
    }
}

#[test]
fn parse_ident() {
    let err = parse_text("x + 1").unwrap_err();
    assert!(matches!(
        &err.kind,
        ParseErrKind::UnexpectedToken(token) if token.token == Token::Ident("x".to_owned())
    ));
    assert_eq!(err.loc(), Location::new(1, 1));
}

#[test]
fn parse_int_out_of_range() {
    let err = parse_text("99999999999999999999").unwrap_err();
    assert!(matches!(err.kind, ParseErrKind::IntOutOfRange(_, _)));
}

#[test]
fn parse_scan_error() {
    let err = parse_text("1 @ 2").unwrap_err();
    match err.kind {
        ParseErrKind::ScanErr(scan_err) => {
            assert_eq!(scan_err.kind, ScanErrKind::UnexpectedChar('@'));
        }
        kind => panic!("Expected ScanErr; got {kind:?}"),
    }
}

#[test]
fn incomplete_input() {
    assert!(parse_text("if (true) {").unwrap_err().is_incomplete());
    assert!(parse_text("if (true) { 1 } else").unwrap_err().is_incomplete());
    assert!(parse_text("(1 + 2").unwrap_err().is_incomplete());
    assert!(!parse_text("1 +").unwrap_err().is_incomplete());
    assert!(!parse_text("1 )").unwrap_err().is_incomplete());
}
