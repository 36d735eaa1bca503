pub use compiler::Compiler;
pub use result::{CompErr, CompErrKind, CompResult};
pub use symbol_table::{Symbol, SymbolScope, SymbolTable};

mod compiler;
mod result;
mod symbol_table;
