//! Prefix and infix operators as they appear in source. The AST keeps
//! operators as text; these enums are the closed set the compiler
//! knows how to lower to opcodes.
use std::fmt;

/// Prefix (unary) operators.
#[derive(Clone, Copy, Eq, PartialEq)]
pub enum PrefixOperator {
    Negate,
    Not,
}

impl PrefixOperator {
    pub fn from_token(token: &str) -> Result<Self, String> {
        let op = match token {
            "-" => Self::Negate,
            "!" => Self::Not,
            _ => return Err(format!("Unknown prefix operator: {token}")),
        };
        Ok(op)
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let string = match self {
            Self::Negate => "-",
            Self::Not => "!",
        };
        write!(f, "{string}")
    }
}

impl fmt::Debug for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Infix (binary) operators, arithmetic and comparison.
#[derive(Clone, Copy, Eq, PartialEq)]
pub enum InfixOperator {
    Mul,
    Div,
    Add,
    Sub,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
}

impl InfixOperator {
    pub fn from_token(token: &str) -> Result<Self, String> {
        let op = match token {
            "*" => Self::Mul,
            "/" => Self::Div,
            "+" => Self::Add,
            "-" => Self::Sub,
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "<" => Self::LessThan,
            ">" => Self::GreaterThan,
            _ => return Err(format!("Unknown infix operator: {token}")),
        };
        Ok(op)
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let string = match self {
            Self::Mul => "*",
            Self::Div => "/",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
        };
        write!(f, "{string}")
    }
}

impl fmt::Debug for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
