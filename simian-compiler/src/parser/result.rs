use std::fmt;

use simian_util::source::Location;

use crate::ast;
use crate::scanner::{ScanErr, Token, TokenWithLocation};

pub type ParseResult = Result<ast::Program, ParseErr>;

#[derive(Clone, Debug, PartialEq)]
pub struct ParseErr {
    pub kind: ParseErrKind,
}

impl ParseErr {
    pub fn new(kind: ParseErrKind) -> Self {
        Self { kind }
    }

    pub fn unexpected_token(token: TokenWithLocation) -> Self {
        Self::new(ParseErrKind::UnexpectedToken(token))
    }

    pub fn expected_token(expected: Token, found: TokenWithLocation) -> Self {
        Self::new(ParseErrKind::ExpectedToken(expected, found))
    }

    pub fn expected_expr(loc: Location) -> Self {
        Self::new(ParseErrKind::ExpectedExpr(loc))
    }

    pub fn int_out_of_range(digits: String, loc: Location) -> Self {
        Self::new(ParseErrKind::IntOutOfRange(digits, loc))
    }

    pub fn is_incomplete(&self) -> bool {
        self.kind.is_incomplete()
    }

    pub fn loc(&self) -> Location {
        use ParseErrKind::*;
        match &self.kind {
            ScanErr(err) => err.location,
            UnexpectedToken(token) => token.start,
            ExpectedToken(_, found) => found.start,
            ExpectedExpr(loc) => *loc,
            IntOutOfRange(_, loc) => *loc,
        }
    }
}

impl From<ScanErr> for ParseErr {
    fn from(err: ScanErr) -> Self {
        Self::new(ParseErrKind::ScanErr(err))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrKind {
    ScanErr(ScanErr),
    UnexpectedToken(TokenWithLocation),
    ExpectedToken(Token, TokenWithLocation),
    ExpectedExpr(Location),
    IntOutOfRange(String, Location),
}

impl ParseErrKind {
    /// Input ended before a block or group was closed, so more input
    /// could complete it.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::ExpectedToken(_, found) if found.token == Token::EndOfInput)
    }
}

impl fmt::Display for ParseErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl fmt::Display for ParseErrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseErrKind::*;
        match self {
            ScanErr(err) => write!(f, "{err}"),
            UnexpectedToken(TokenWithLocation { token: Token::Ident(name), start, .. }) => {
                write!(f, "unexpected identifier at {start}: {name} (names aren't supported)")
            }
            UnexpectedToken(token) => {
                write!(f, "unexpected token at {}: '{}'", token.start, token.token)
            }
            ExpectedToken(expected, found) => write!(
                f,
                "expected '{expected}' at {}; found '{}'",
                found.start, found.token
            ),
            ExpectedExpr(loc) => write!(f, "expected expression at {loc}"),
            IntOutOfRange(digits, loc) => {
                write!(f, "integer literal out of range at {loc}: {digits}")
            }
        }
    }
}
