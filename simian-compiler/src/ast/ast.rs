use std::fmt;

use simian_util::source::Location;

/// Program - the root node; a list of statements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Whether running the program leaves a result, i.e. whether its
    /// last statement is an expression with a value.
    pub fn yields_value(&self) -> bool {
        last_yields_value(&self.statements)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statements(f, &self.statements)
    }
}

/// Block - a braced list of statements, e.g. an if branch.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub start: Location,
    pub end: Location,
}

impl Block {
    pub fn new(statements: Vec<Statement>, start: Location, end: Location) -> Self {
        Self { statements, start, end }
    }

    /// A block yields a value when its last statement is an expression
    /// that leaves one behind. Statement-form if expressions (those
    /// without an else) don't.
    pub fn yields_value(&self) -> bool {
        last_yields_value(&self.statements)
    }
}

fn last_yields_value(statements: &[Statement]) -> bool {
    match statements.last() {
        Some(statement) => match &statement.kind {
            StatementKind::Expr(expr) => !expr.is_valueless_if(),
        },
        None => false,
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        write_statements(f, &self.statements)?;
        write!(f, " }}")
    }
}

/// Statement - a discrete unit of code.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub start: Location,
    pub end: Location,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StatementKind {
    /// An expression evaluated for its value, which is then discarded.
    Expr(Expr),
}

impl Statement {
    pub fn new(kind: StatementKind, start: Location, end: Location) -> Self {
        Self { kind, start, end }
    }

    pub fn new_expr(expr: Expr, start: Location, end: Location) -> Self {
        Self::new(StatementKind::Expr(expr), start, end)
    }

    pub fn expr(&self) -> Option<&Expr> {
        match &self.kind {
            StatementKind::Expr(expr) => Some(expr),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StatementKind::Expr(expr) => write!(f, "{expr}"),
        }
    }
}

/// Expression - evaluates to a value.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub start: Location,
    pub end: Location,
}

/// Operators are kept as source text. Mapping them to operations is
/// the compiler's job, so ASTs built by other front ends can carry
/// operators the compiler rejects.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Bool(bool),
    Prefix(String, Box<Expr>),
    Infix(Box<Expr>, String, Box<Expr>),
    If(IfExpr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfExpr {
    pub condition: Box<Expr>,
    pub consequence: Block,
    pub alternative: Option<Block>,
}

impl Expr {
    pub fn new(kind: ExprKind, start: Location, end: Location) -> Self {
        Self { kind, start, end }
    }

    pub fn new_int(value: i64, start: Location, end: Location) -> Self {
        Self::new(ExprKind::Int(value), start, end)
    }

    pub fn new_bool(value: bool, start: Location, end: Location) -> Self {
        Self::new(ExprKind::Bool(value), start, end)
    }

    pub fn new_prefix(op: &str, operand: Expr, start: Location, end: Location) -> Self {
        Self::new(ExprKind::Prefix(op.to_owned(), Box::new(operand)), start, end)
    }

    pub fn new_infix(
        lhs: Expr,
        op: &str,
        rhs: Expr,
        start: Location,
        end: Location,
    ) -> Self {
        Self::new(ExprKind::Infix(Box::new(lhs), op.to_owned(), Box::new(rhs)), start, end)
    }

    pub fn new_if(
        condition: Expr,
        consequence: Block,
        alternative: Option<Block>,
        start: Location,
        end: Location,
    ) -> Self {
        let if_expr =
            IfExpr { condition: Box::new(condition), consequence, alternative };
        Self::new(ExprKind::If(if_expr), start, end)
    }

    /// An if without an else has no value when its condition is false.
    pub fn is_valueless_if(&self) -> bool {
        matches!(&self.kind, ExprKind::If(IfExpr { alternative: None, .. }))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Int(value) => write!(f, "{value}"),
            ExprKind::Bool(value) => write!(f, "{value}"),
            ExprKind::Prefix(op, operand) => write!(f, "({op}{operand})"),
            ExprKind::Infix(lhs, op, rhs) => write!(f, "({lhs} {op} {rhs})"),
            ExprKind::If(IfExpr { condition, consequence, alternative }) => {
                write!(f, "if {condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {alternative}")?;
                }
                Ok(())
            }
        }
    }
}

fn write_statements(f: &mut fmt::Formatter<'_>, statements: &[Statement]) -> fmt::Result {
    let items: Vec<String> = statements.iter().map(|s| s.to_string()).collect();
    write!(f, "{}", items.join("; "))
}
