//! # Simian
//!
//! Simian is a stack-based bytecode interpreter. This crate holds the
//! small pieces shared by the front end and the driver.

pub mod op;
pub mod source;

#[cfg(test)]
mod tests;
