use std::fmt;

pub type RuntimeResult<T = ()> = Result<T, RuntimeErr>;

#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeErr {
    pub kind: RuntimeErrKind,
}

impl RuntimeErr {
    pub fn new(kind: RuntimeErrKind) -> Self {
        Self { kind }
    }

    pub fn stack_overflow(capacity: usize) -> Self {
        Self::new(RuntimeErrKind::StackOverflow(capacity))
    }

    pub fn empty_stack() -> Self {
        Self::new(RuntimeErrKind::EmptyStack)
    }

    pub fn type_mismatch(op: &'static str, lhs: &'static str, rhs: &'static str) -> Self {
        Self::new(RuntimeErrKind::TypeMismatch(op, lhs, rhs))
    }

    pub fn unsupported_operand(op: &'static str, type_name: &'static str) -> Self {
        Self::new(RuntimeErrKind::UnsupportedOperand(op, type_name))
    }

    pub fn division_by_zero() -> Self {
        Self::new(RuntimeErrKind::DivisionByZero)
    }

    pub fn undefined_opcode(byte: u8, ip: usize) -> Self {
        Self::new(RuntimeErrKind::UndefinedOpcode(byte, ip))
    }

    pub fn truncated_instruction(ip: usize) -> Self {
        Self::new(RuntimeErrKind::TruncatedInstruction(ip))
    }

    pub fn constant_not_found(index: usize) -> Self {
        Self::new(RuntimeErrKind::ConstantNotFound(index))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RuntimeErrKind {
    StackOverflow(usize),
    EmptyStack,
    /// Operator, LHS type, RHS type
    TypeMismatch(&'static str, &'static str, &'static str),
    /// Operator, operand type
    UnsupportedOperand(&'static str, &'static str),
    DivisionByZero,
    /// Opcode byte, instruction pointer
    UndefinedOpcode(u8, usize),
    TruncatedInstruction(usize),
    ConstantNotFound(usize),
}

impl fmt::Display for RuntimeErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl fmt::Display for RuntimeErrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RuntimeErrKind::*;
        match self {
            StackOverflow(capacity) => {
                write!(f, "stack overflow (capacity is {capacity} slots)")
            }
            EmptyStack => write!(f, "attempted to pop from an empty stack"),
            TypeMismatch(op, lhs, rhs) => {
                write!(f, "type mismatch: {lhs} {op} {rhs}")
            }
            UnsupportedOperand(op, type_name) => {
                write!(f, "unsupported operand type for {op}: {type_name}")
            }
            DivisionByZero => write!(f, "division by zero"),
            UndefinedOpcode(byte, ip) => write!(f, "opcode {byte} at {ip} is not defined"),
            TruncatedInstruction(ip) => {
                write!(f, "instruction at {ip} runs past the end of the stream")
            }
            ConstantNotFound(index) => write!(f, "constant not found at index {index}"),
        }
    }
}
