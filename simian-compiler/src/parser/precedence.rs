use crate::scanner::Token;

/// Binding power of infix operators, lowest first.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Equals,      // == !=
    LessGreater, // < >
    Sum,         // + -
    Product,     // * /
    Prefix,      // -x !x
}

/// Get the precedence of `token` when it appears in infix position.
/// Tokens that can't continue an expression have the lowest
/// precedence, which ends the expression.
pub fn get_infix_precedence(token: &Token) -> Precedence {
    use Token::*;
    match token {
        EqualEqual | NotEqual => Precedence::Equals,
        LessThan | GreaterThan => Precedence::LessGreater,
        Plus | Minus => Precedence::Sum,
        Star | Slash => Precedence::Product,
        _ => Precedence::Lowest,
    }
}
