//! The instruction set: opcodes, their operand layouts, and the byte
//! encoding shared by the compiler, the VM, and the disassembler.
pub use bytecode::ByteCode;
pub use inst::{make, read_operands, read_u16, Instructions};
pub use op::{lookup, Definition, Opcode};
pub use result::{CodeErr, CodeErrKind, CodeResult};

mod bytecode;
mod inst;
mod op;
mod result;
