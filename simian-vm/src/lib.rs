pub use dis::Disassembler;
pub use result::{RuntimeErr, RuntimeErrKind, RuntimeResult};
pub use vm::{DEFAULT_STACK_SIZE, VM};

pub mod dis;
pub mod result;
pub mod vm;
