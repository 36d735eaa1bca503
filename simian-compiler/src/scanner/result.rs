use std::fmt;

use simian_util::source::Location;

use super::token::TokenWithLocation;

pub type ScanResult = Result<TokenWithLocation, ScanErr>;

#[derive(Clone, Debug, PartialEq)]
pub struct ScanErr {
    pub kind: ScanErrKind,
    pub location: Location,
}

impl ScanErr {
    pub fn new(kind: ScanErrKind, location: Location) -> Self {
        Self { kind, location }
    }

    pub fn unexpected_char(c: char, location: Location) -> Self {
        Self::new(ScanErrKind::UnexpectedChar(c), location)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScanErrKind {
    UnexpectedChar(char),
}

impl fmt::Display for ScanErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ScanErrKind::UnexpectedChar(c) => {
                write!(f, "unexpected character at {}: '{c}'", self.location)
            }
        }
    }
}
