pub use compiler::{CompErr, CompErrKind, CompResult, Compiler, Symbol, SymbolScope, SymbolTable};
pub use parser::{parse_text, ParseErr, ParseErrKind, Parser};
pub use scanner::{ScanErr, ScanErrKind, Scanner, Token, TokenWithLocation};

pub mod ast;
pub mod compiler;
pub mod parser;
pub mod scanner;

#[cfg(test)]
mod tests;
