use super::result::{CodeErr, CodeResult};

/// Defines the `Opcode` enum, its byte tags, and its `Definition`s
/// from a single table. Adding an opcode is a one-line change here
/// plus a handler in the VM.
macro_rules! define_opcodes {
    (
        $(
            $(#[$doc:meta])*
            $name:ident = $tag:literal => [ $( $width:literal ),* ]
        ),* $(,)?
    ) => {
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[repr(u8)]
        pub enum Opcode {
            $(
                $(#[$doc])*
                $name = $tag,
            )*
        }

        impl TryFrom<u8> for Opcode {
            type Error = CodeErr;

            fn try_from(byte: u8) -> Result<Self, Self::Error> {
                match byte {
                    $( $tag => Ok(Self::$name), )*
                    _ => Err(CodeErr::undefined_opcode(byte)),
                }
            }
        }

        impl Opcode {
            pub const fn definition(self) -> Definition {
                match self {
                    $(
                        Self::$name => Definition {
                            name: stringify!($name),
                            operand_widths: &[$( $width ),*],
                        },
                    )*
                }
            }
        }
    };
}

define_opcodes! {
    /// Push the constant at the operand index onto the stack.
    Constant = 0x00 => [2],
    /// Discard TOS.
    Pop = 0x01 => [],
    Add = 0x02 => [],
    Sub = 0x03 => [],
    Mul = 0x04 => [],
    Div = 0x05 => [],
    True = 0x06 => [],
    False = 0x07 => [],
    Equal = 0x08 => [],
    NotEqual = 0x09 => [],
    /// `a < b` is compiled as `b > a`, so there's no LessThan.
    GreaterThan = 0x0a => [],
    /// Arithmetic negation.
    Minus = 0x0b => [],
    /// Logical not.
    Bang = 0x0c => [],
    /// Jump to the absolute address in the operand.
    Jump = 0x0d => [2],
    /// Pop TOS and jump to the operand address if it's not truthy.
    JumpNotTruthy = 0x0e => [2],
}

impl Opcode {
    pub fn name(self) -> &'static str {
        self.definition().name
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// The display name and operand layout of an opcode. The widths are in
/// bytes, one per operand, in order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Definition {
    pub name: &'static str,
    pub operand_widths: &'static [usize],
}

impl Definition {
    /// Total size of the operands in bytes.
    pub fn operands_len(&self) -> usize {
        self.operand_widths.iter().sum()
    }

    /// Total size of an encoded instruction (opcode plus operands).
    pub fn inst_len(&self) -> usize {
        1 + self.operands_len()
    }
}

/// Look up the definition for the opcode with the specified tag.
pub fn lookup(byte: u8) -> CodeResult<Definition> {
    Opcode::try_from(byte).map(Opcode::definition)
}
