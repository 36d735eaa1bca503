use simian_builtins::code::{make, ByteCode, Instructions, Opcode::*};
use simian_builtins::types::{new, ObjectRef};
use simian_util::source::Location;

use crate::ast;
use crate::compiler::*;
use crate::parser::parse_text;

fn compile_ok(source: &str) -> ByteCode {
    let program = parse_text(source).unwrap();
    let mut compiler = Compiler::new();
    let result = compiler.compile(&program);
    assert!(result.is_ok(), "{result:?}");
    compiler.into_bytecode()
}

fn compile_err(source: &str) -> CompErr {
    let program = parse_text(source).unwrap();
    let mut compiler = Compiler::new();
    compiler.compile(&program).unwrap_err()
}

fn ints(values: &[i64]) -> Vec<ObjectRef> {
    values.iter().map(|v| new::int(*v)).collect()
}

fn check(source: &str, constants: &[i64], instructions: Vec<Vec<u8>>) {
    let bytecode = compile_ok(source);
    let expected: Instructions = instructions.into_iter().collect();
    assert_eq!(bytecode.instructions(), &expected, "{source}");
    assert_eq!(bytecode.constants(), ints(constants).as_slice(), "{source}");
}

fn loc() -> Location {
    Location::default()
}

#[test]
fn compile_empty_program() {
    let bytecode = compile_ok("");
    assert!(bytecode.instructions().is_empty());
    assert!(bytecode.constants().is_empty());
}

#[test]
fn compile_add() {
    check(
        "1 + 2",
        &[1, 2],
        vec![make(Constant, &[0]), make(Constant, &[1]), make(Add, &[]), make(Pop, &[])],
    );
}

#[test]
fn compile_expression_statements() {
    check(
        "1; 2",
        &[1, 2],
        vec![make(Constant, &[0]), make(Pop, &[]), make(Constant, &[1]), make(Pop, &[])],
    );
}

#[test]
fn compile_arithmetic() {
    for (source, opcode) in [("1 - 2", Sub), ("1 * 2", Mul), ("2 / 1", Div)] {
        let (a, b) = if source == "2 / 1" { (2, 1) } else { (1, 2) };
        check(
            source,
            &[a, b],
            vec![make(Constant, &[0]), make(Constant, &[1]), make(opcode, &[]), make(Pop, &[])],
        );
    }
}

#[test]
fn compile_less_than_swaps_operands() {
    check(
        "5 < 3",
        &[3, 5],
        vec![
            make(Constant, &[0]),
            make(Constant, &[1]),
            make(GreaterThan, &[]),
            make(Pop, &[]),
        ],
    );
}

#[test]
fn compile_comparisons() {
    for (source, opcode) in [("5 > 3", GreaterThan), ("5 == 3", Equal), ("5 != 3", NotEqual)] {
        check(
            source,
            &[5, 3],
            vec![make(Constant, &[0]), make(Constant, &[1]), make(opcode, &[]), make(Pop, &[])],
        );
    }
}

#[test]
fn compile_bools() {
    check("true", &[], vec![make(True, &[]), make(Pop, &[])]);
    check("false", &[], vec![make(False, &[]), make(Pop, &[])]);
    check(
        "true != false",
        &[],
        vec![make(True, &[]), make(False, &[]), make(NotEqual, &[]), make(Pop, &[])],
    );
}

#[test]
fn compile_prefix() {
    check("-1", &[1], vec![make(Constant, &[0]), make(Minus, &[]), make(Pop, &[])]);
    check("!true", &[], vec![make(True, &[]), make(Bang, &[]), make(Pop, &[])]);
}

#[test]
fn compile_if_else() {
    check(
        "if (true) { 10 } else { 20 }; 33;",
        &[10, 20, 33],
        vec![
            make(True, &[]),               // 0000
            make(JumpNotTruthy, &[10]),    // 0001
            make(Constant, &[0]),          // 0004
            make(Jump, &[13]),             // 0007
            make(Constant, &[1]),          // 0010
            make(Pop, &[]),                // 0013
            make(Constant, &[2]),          // 0014
            make(Pop, &[]),                // 0017
        ],
    );
}

#[test]
fn compile_if_else_keeps_inner_pops() {
    check(
        "if (true) { 1; 2 } else { 3 }",
        &[1, 2, 3],
        vec![
            make(True, &[]),               // 0000
            make(JumpNotTruthy, &[14]),    // 0001
            make(Constant, &[0]),          // 0004
            make(Pop, &[]),                // 0007
            make(Constant, &[1]),          // 0008
            make(Jump, &[17]),             // 0011
            make(Constant, &[2]),          // 0014
            make(Pop, &[]),                // 0017
        ],
    );
}

#[test]
fn compile_if_else_as_operand() {
    check(
        "1 + if (false) { 2 } else { 3 }",
        &[1, 2, 3],
        vec![
            make(Constant, &[0]),          // 0000
            make(False, &[]),              // 0003
            make(JumpNotTruthy, &[13]),    // 0004
            make(Constant, &[1]),          // 0007
            make(Jump, &[16]),             // 0010
            make(Constant, &[2]),          // 0013
            make(Add, &[]),                // 0016
            make(Pop, &[]),                // 0017
        ],
    );
}

#[test]
fn compile_if_statement() {
    check(
        "if (true) { 10 }; 3333;",
        &[10, 3333],
        vec![
            make(True, &[]),               // 0000
            make(JumpNotTruthy, &[8]),     // 0001
            make(Constant, &[0]),          // 0004
            make(Pop, &[]),                // 0007
            make(Constant, &[1]),          // 0008
            make(Pop, &[]),                // 0011
        ],
    );
}

#[test]
fn compile_if_statement_with_empty_body() {
    check("if (true) { }", &[], vec![make(True, &[]), make(JumpNotTruthy, &[4])]);
}

#[test]
fn compile_valueless_if_as_operand() {
    let err = compile_err("if (true) { 1 } + 2");
    assert!(matches!(err.kind, CompErrKind::ValuelessIf(..)));
    assert_eq!(err.loc(), Some((Location::new(1, 1), Location::new(1, 15))));
}

#[test]
fn compile_valueless_if_as_condition() {
    let err = compile_err("if (if (true) { 1 }) { 2 }");
    assert!(matches!(err.kind, CompErrKind::ValuelessIf(..)));
}

#[test]
fn compile_branch_without_value() {
    let err = compile_err("if (true) { } else { 1 }");
    assert!(matches!(err.kind, CompErrKind::BranchWithoutValue(..)));

    let err = compile_err("if (true) { 1 } else { if (false) { 2 } }");
    assert!(matches!(err.kind, CompErrKind::BranchWithoutValue(..)));
}

#[test]
fn compile_unknown_prefix_operator() {
    let operand = ast::Expr::new_int(1, loc(), loc());
    let expr = ast::Expr::new_prefix("~", operand, loc(), loc());
    let program = ast::Program::new(vec![ast::Statement::new_expr(expr, loc(), loc())]);
    let mut compiler = Compiler::new();
    let err = compiler.compile(&program).unwrap_err();
    assert!(matches!(&err.kind, CompErrKind::UnknownPrefixOperator(op, ..) if op == "~"));
    assert_eq!(err.to_string(), "unknown prefix operator: ~");
}

#[test]
fn compile_unknown_infix_operator_leaves_partial_bytecode() {
    let lhs = ast::Expr::new_int(1, loc(), loc());
    let rhs = ast::Expr::new_int(2, loc(), loc());
    let expr = ast::Expr::new_infix(lhs, "%", rhs, loc(), loc());
    let program = ast::Program::new(vec![ast::Statement::new_expr(expr, loc(), loc())]);
    let mut compiler = Compiler::new();
    let err = compiler.compile(&program).unwrap_err();
    assert_eq!(err.to_string(), "unknown infix operator: %");
    let bytecode = compiler.bytecode();
    let expected: Instructions =
        vec![make(Constant, &[0]), make(Constant, &[1])].into_iter().collect();
    assert_eq!(bytecode.instructions(), &expected);
}

#[test]
fn compile_too_many_constants() {
    let statements = (0..=u16::MAX as i64 + 1)
        .map(|i| {
            let expr = ast::Expr::new_int(i, loc(), loc());
            ast::Statement::new_expr(expr, loc(), loc())
        })
        .collect();
    let program = ast::Program::new(statements);
    let mut compiler = Compiler::new();
    let err = compiler.compile(&program).unwrap_err();
    assert_eq!(err.kind, CompErrKind::TooManyConstants(65537));
    assert_eq!(compiler.bytecode().constants().len(), 65536);
}

#[test]
fn compile_jump_out_of_range() {
    // Each statement in the consequence is Constant + Pop (4 bytes).
    let statements: Vec<ast::Statement> = (0..17_000)
        .map(|i| {
            let expr = ast::Expr::new_int(i, loc(), loc());
            ast::Statement::new_expr(expr, loc(), loc())
        })
        .collect();
    let consequence = ast::Block::new(statements, loc(), loc());
    let alternative = ast::Block::new(
        vec![ast::Statement::new_expr(ast::Expr::new_int(0, loc(), loc()), loc(), loc())],
        loc(),
        loc(),
    );
    let condition = ast::Expr::new_bool(true, loc(), loc());
    let expr = ast::Expr::new_if(condition, consequence, Some(alternative), loc(), loc());
    let program = ast::Program::new(vec![ast::Statement::new_expr(expr, loc(), loc())]);
    let mut compiler = Compiler::new();
    let err = compiler.compile(&program).unwrap_err();
    assert!(matches!(err.kind, CompErrKind::JumpOutOfRange(addr) if addr > 65535));
}

#[test]
fn compiler_keeps_symbol_table() {
    let mut table = SymbolTable::new();
    table.define("a");
    let mut compiler = Compiler::with_symbol_table(table);
    compiler.symbol_table_mut().define("b");
    compiler.compile(&parse_text("1").unwrap()).unwrap();
    let table = compiler.symbol_table();
    assert_eq!(table.resolve("a"), Some(&Symbol::new("a", SymbolScope::Global, 0)));
    assert_eq!(table.resolve("b"), Some(&Symbol::new("b", SymbolScope::Global, 1)));
}
