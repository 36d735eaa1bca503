use std::fmt;

use simian_builtins::types::ObjectRef;
use simian_compiler::{CompErrKind, ParseErrKind, ScanErrKind};
use simian_vm::RuntimeErrKind;

/// Result type used by top level program driver. On success, this
/// holds the value of the last expression statement, if any.
pub type DriverResult = Result<Option<ObjectRef>, DriverErr>;

#[derive(Debug)]
pub struct DriverErr {
    pub kind: DriverErrKind,
}

impl DriverErr {
    pub fn new(kind: DriverErrKind) -> Self {
        Self { kind }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        use DriverErrKind::*;
        match &self.kind {
            CouldNotReadSourceFile(_) | ReplErr(_) => 1,
            ScanErr(_) | ParseErr(_) => 2,
            CompErr(_) => 3,
            RuntimeErr(_) => 4,
        }
    }
}

#[derive(Debug)]
pub enum DriverErrKind {
    // These errors are NOT reported by the driver. They should be
    // reported by the user of the driver (e.g., in main, REPL).
    CouldNotReadSourceFile(String),
    ReplErr(String),
    // These errors ARE reported by the driver.
    ScanErr(ScanErrKind),
    ParseErr(ParseErrKind),
    CompErr(CompErrKind),
    RuntimeErr(RuntimeErrKind),
}

impl fmt::Display for DriverErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl fmt::Display for DriverErrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DriverErrKind::*;
        let msg = match self {
            CouldNotReadSourceFile(file_name) => {
                format!("Could not read source file: {file_name}")
            }
            ReplErr(msg) => format!("REPL error: {msg}"),
            ScanErr(kind) => format!("Scan error: {kind:?}"),
            ParseErr(kind) => format!("Parse error: {kind}"),
            CompErr(kind) => format!("Compilation error: {kind:?}"),
            RuntimeErr(kind) => format!("Runtime error: {kind}"),
        };
        write!(f, "{msg}")
    }
}
