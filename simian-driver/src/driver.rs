//! Front end for executing code from a source on a VM.
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use simian_builtins::code::ByteCode;
use simian_builtins::types::ObjectRef;
use simian_compiler::{ast, parse_text, CompErr, Compiler, ParseErr, ParseErrKind, ScanErr};
use simian_util::source::{get_line, Location};
use simian_vm::{Disassembler, RuntimeErr, RuntimeResult, VM};

use super::result::{DriverErr, DriverErrKind, DriverResult};

pub struct Driver {
    stack_size: usize,
    incremental: bool,
    dis: bool,
    debug: bool,
    current_file_name: String,
    // Artifacts of the most recent run, kept for inspection.
    bytecode: Option<ByteCode>,
    vm: Option<VM>,
}

impl Driver {
    /// When `incremental` is set, errors caused by input that ends
    /// before a block or group is closed aren't reported, since the
    /// caller (i.e., the REPL) is expected to ask for more input.
    pub fn new(stack_size: usize, incremental: bool, dis: bool, debug: bool) -> Self {
        Self {
            stack_size,
            incremental,
            dis,
            debug,
            current_file_name: "<none>".to_owned(),
            bytecode: None,
            vm: None,
        }
    }

    // Execute ---------------------------------------------------------

    /// Execute a line (or lines) entered in the REPL. Each entry is
    /// compiled and run on its own.
    pub fn execute_repl(&mut self, text: &str) -> DriverResult {
        self.current_file_name = "<repl>".to_owned();
        self.execute_source(text)
    }

    /// Execute source from file.
    pub fn execute_file(&mut self, file_path: &Path) -> DriverResult {
        match fs::read_to_string(file_path) {
            Ok(text) => {
                self.current_file_name = file_path.display().to_string();
                self.execute_source(&text)
            }
            Err(err) => {
                let message = format!("{}: {err}", file_path.display());
                Err(DriverErr::new(DriverErrKind::CouldNotReadSourceFile(message)))
            }
        }
    }

    /// Execute source from stdin.
    pub fn execute_stdin(&mut self) -> DriverResult {
        self.current_file_name = "<stdin>".to_owned();
        let mut text = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut text) {
            let message = format!("<stdin>: {err}");
            return Err(DriverErr::new(DriverErrKind::CouldNotReadSourceFile(message)));
        }
        self.execute_source(&text)
    }

    /// Execute text.
    pub fn execute_text(&mut self, text: &str) -> DriverResult {
        self.current_file_name = "<text>".to_owned();
        self.execute_source(text)
    }

    /// Parse, compile, and run source text with a fresh compiler and a
    /// fresh VM. Returns the value of the last expression statement, or
    /// `None` if the program ends with a statement that has no value
    /// (an if without an else).
    ///
    /// NOTE: *All* execution should go through here for standardized
    ///       handling of debugging, disassembly, and errors.
    fn execute_source(&mut self, text: &str) -> DriverResult {
        let program = self.parse_source(text)?;
        let bytecode = self.compile_program(&program, text)?;
        let yields_value = program.yields_value();

        if self.dis {
            println!("{}", Disassembler::new().disassemble(&bytecode));
        }

        self.bytecode = Some(bytecode.clone());
        let mut vm = VM::with_stack_size(bytecode, self.stack_size);
        let result = vm.run();
        self.vm = Some(vm);

        if self.debug {
            self.display_stack();
            self.display_vm_state(&result);
        }

        match result {
            Ok(()) if yields_value => Ok(self.last_popped()),
            Ok(()) => Ok(None),
            Err(err) => {
                self.handle_runtime_err(&err);
                Err(DriverErr::new(DriverErrKind::RuntimeErr(err.kind)))
            }
        }
    }

    // Parsing ---------------------------------------------------------

    /// Parse source text into an AST program node.
    fn parse_source(&mut self, text: &str) -> Result<ast::Program, DriverErr> {
        log::trace!("BEGIN: parse {}", self.current_file_name);
        match parse_text(text) {
            Ok(program) => Ok(program),
            Err(err) => {
                if let ParseErrKind::ScanErr(scan_err) = err.kind {
                    self.handle_scan_err(&scan_err, text);
                    Err(DriverErr::new(DriverErrKind::ScanErr(scan_err.kind)))
                } else {
                    self.handle_parse_err(&err, text);
                    Err(DriverErr::new(DriverErrKind::ParseErr(err.kind)))
                }
            }
        }
    }

    // Compilation -----------------------------------------------------

    fn compile_program(
        &mut self,
        program: &ast::Program,
        text: &str,
    ) -> Result<ByteCode, DriverErr> {
        let mut compiler = Compiler::new();
        compiler.compile(program).map_err(|err| {
            self.handle_comp_err(&err, text);
            DriverErr::new(DriverErrKind::CompErr(err.kind))
        })?;
        Ok(compiler.into_bytecode())
    }

    // Error Handling --------------------------------------------------

    fn print_err_line(&self, line_no: usize, line: &str) {
        let file_name = self.current_file_name.as_str();
        let line = line.trim_end();
        eprintln!("\n  Error in {file_name} on line {line_no}:\n\n    |\n    |{line}");
    }

    fn print_err_message(&self, message: String, start: Location, end: Location) {
        if !message.is_empty() {
            let start_pos = if start.col == 0 { 0 } else { start.col - 1 };
            let marker = if start == end || end.line != start.line {
                format!("{:>start_pos$}^", "")
            } else {
                let end_pos = end.col.saturating_sub(start.col);
                format!("{:>start_pos$}^{:^>end_pos$}", "", "")
            };
            eprintln!("    |{marker}\n\n  {message}\n");
        }
    }

    fn handle_scan_err(&self, err: &ScanErr, text: &str) {
        let loc = err.location;
        self.print_err_line(loc.line, get_line(text, loc.line).unwrap_or("<none>"));
        let mut message = format!("Syntax error: {err}");
        if self.debug {
            message = format!("SCAN ERROR: {message}");
        }
        self.print_err_message(message, loc, loc);
    }

    fn handle_parse_err(&self, err: &ParseErr, text: &str) {
        if self.incremental && err.is_incomplete() {
            return;
        }
        let loc = err.loc();
        self.print_err_line(loc.line, get_line(text, loc.line).unwrap_or("<none>"));
        let mut message = format!("Parse error: {err}");
        if self.debug {
            message = format!("PARSE ERROR: {message}");
        }
        self.print_err_message(message, loc, loc);
    }

    fn handle_comp_err(&self, err: &CompErr, text: &str) {
        let message = format!("COMPILATION ERROR: {err}");
        match err.loc() {
            Some((start, end)) if start.is_known() => {
                let line = get_line(text, start.line).unwrap_or("<none>");
                self.print_err_line(start.line, line);
                self.print_err_message(message, start, end);
            }
            _ => {
                eprintln!("\n  Error in {}:\n\n  {message}\n", self.current_file_name);
            }
        }
    }

    /// The VM doesn't track source locations, so runtime errors are
    /// reported without a source line.
    fn handle_runtime_err(&self, err: &RuntimeErr) {
        let mut message = format!("Runtime error: {err}");
        if self.debug {
            message = format!("RUNTIME ERROR: {message}");
        }
        eprintln!("\n  Error in {}:\n\n  {message}\n", self.current_file_name);
    }

    // Miscellaneous ---------------------------------------------------

    /// The object most recently popped by the VM in the most recent
    /// run.
    fn last_popped(&self) -> Option<ObjectRef> {
        self.vm.as_ref().and_then(|vm| vm.last_popped().cloned())
    }

    /// Bytecode from the most recent successful compile.
    pub fn bytecode(&self) -> Option<&ByteCode> {
        self.bytecode.as_ref()
    }

    pub fn display_stack(&self) {
        eprintln!("{:=<79}", "STACK ");
        match &self.vm {
            Some(vm) => vm.display_stack(),
            None => eprintln!("[NO VM]"),
        }
    }

    fn display_vm_state(&self, result: &RuntimeResult) {
        eprintln!("\n{:=<79}", "VM STATE ");
        eprintln!("{result:?}");
    }
}
