use std::fmt;

use simian_util::source::Location;

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Int(String), // 1 (digits only; sign is a prefix op)

    True,  // true
    False, // false
    If,    // if
    Else,  // else

    // Scanned so the parser can report them; the language doesn't
    // have bindings yet.
    Ident(String),

    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /
    Bang,  // !

    LessThan,    // <
    GreaterThan, // >
    EqualEqual,  // ==
    NotEqual,    // !=

    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;

    EndOfInput,
}

impl Token {
    pub fn as_str(&self) -> &str {
        use Token::*;
        match self {
            Int(digits) => digits.as_str(),
            True => "true",
            False => "false",
            If => "if",
            Else => "else",
            Ident(name) => name.as_str(),
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Bang => "!",
            LessThan => "<",
            GreaterThan => ">",
            EqualEqual => "==",
            NotEqual => "!=",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            Semicolon => ";",
            EndOfInput => "<EOI>",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TokenWithLocation {
    pub token: Token,
    pub start: Location,
    pub end: Location,
}

impl TokenWithLocation {
    pub fn new(token: Token, start: Location, end: Location) -> Self {
        Self { token, start, end }
    }
}
