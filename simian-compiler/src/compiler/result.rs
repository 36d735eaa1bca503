use std::fmt;

use simian_util::source::Location;

pub type CompResult = Result<(), CompErr>;

#[derive(Clone, Debug, PartialEq)]
pub struct CompErr {
    pub kind: CompErrKind,
}

impl CompErr {
    fn new(kind: CompErrKind) -> Self {
        Self { kind }
    }

    pub fn unknown_prefix_operator<S: Into<String>>(
        op: S,
        start: Location,
        end: Location,
    ) -> Self {
        Self::new(CompErrKind::UnknownPrefixOperator(op.into(), start, end))
    }

    pub fn unknown_infix_operator<S: Into<String>>(
        op: S,
        start: Location,
        end: Location,
    ) -> Self {
        Self::new(CompErrKind::UnknownInfixOperator(op.into(), start, end))
    }

    pub fn valueless_if(start: Location, end: Location) -> Self {
        Self::new(CompErrKind::ValuelessIf(start, end))
    }

    pub fn branch_without_value(start: Location, end: Location) -> Self {
        Self::new(CompErrKind::BranchWithoutValue(start, end))
    }

    pub fn too_many_constants(count: usize) -> Self {
        Self::new(CompErrKind::TooManyConstants(count))
    }

    pub fn jump_out_of_range(addr: usize) -> Self {
        Self::new(CompErrKind::JumpOutOfRange(addr))
    }

    /// Source span of the error, if it's tied to a node.
    pub fn loc(&self) -> Option<(Location, Location)> {
        use CompErrKind::*;
        let (start, end) = match &self.kind {
            UnknownPrefixOperator(_, start, end) => (start, end),
            UnknownInfixOperator(_, start, end) => (start, end),
            ValuelessIf(start, end) => (start, end),
            BranchWithoutValue(start, end) => (start, end),
            TooManyConstants(_) | JumpOutOfRange(_) => return None,
        };
        Some((*start, *end))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CompErrKind {
    UnknownPrefixOperator(String, Location, Location),
    UnknownInfixOperator(String, Location, Location),
    ValuelessIf(Location, Location),
    BranchWithoutValue(Location, Location),
    TooManyConstants(usize),
    JumpOutOfRange(usize),
}

impl fmt::Display for CompErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CompErrKind::*;
        match &self.kind {
            UnknownPrefixOperator(op, ..) => write!(f, "unknown prefix operator: {op}"),
            UnknownInfixOperator(op, ..) => write!(f, "unknown infix operator: {op}"),
            ValuelessIf(..) => {
                write!(f, "if without else has no value; add an else branch")
            }
            BranchWithoutValue(..) => {
                write!(f, "each branch of an if/else must end with an expression")
            }
            TooManyConstants(count) => {
                write!(f, "too many constants: {count} (max {})", u16::MAX as usize + 1)
            }
            JumpOutOfRange(addr) => {
                write!(f, "jump target out of range: {addr} (max {})", u16::MAX)
            }
        }
    }
}
