mod compiler;
mod parser;
