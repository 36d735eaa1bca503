pub use ast::*;

mod ast;
