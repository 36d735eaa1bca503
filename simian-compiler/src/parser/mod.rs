pub use parser::{parse_text, Parser};
pub use result::{ParseErr, ParseErrKind, ParseResult};

mod parser;
mod precedence;
mod result;
