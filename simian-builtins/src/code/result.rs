use std::fmt;

pub type CodeResult<T> = Result<T, CodeErr>;

#[derive(Clone, Debug, PartialEq)]
pub struct CodeErr {
    pub kind: CodeErrKind,
}

impl CodeErr {
    pub fn new(kind: CodeErrKind) -> Self {
        Self { kind }
    }

    pub fn undefined_opcode(byte: u8) -> Self {
        Self::new(CodeErrKind::UndefinedOpcode(byte))
    }

    pub fn truncated_operands(name: &'static str, expected: usize, available: usize) -> Self {
        Self::new(CodeErrKind::TruncatedOperands(name, expected, available))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CodeErrKind {
    UndefinedOpcode(u8),
    /// opcode name, operand bytes expected, operand bytes available
    TruncatedOperands(&'static str, usize, usize),
}

impl fmt::Display for CodeErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CodeErrKind::*;
        match &self.kind {
            UndefinedOpcode(byte) => write!(f, "opcode {byte} is not defined"),
            TruncatedOperands(name, expected, available) => write!(
                f,
                "{name} expects {expected} operand bytes but only {available} remain"
            ),
        }
    }
}
