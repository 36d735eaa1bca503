//! # Simian REPL
use std::fs;
use std::path::PathBuf;

use rustyline::error::ReadlineError;

use simian_driver::{Driver, DriverErr, DriverErrKind, DriverResult};
use simian_vm::Disassembler;

pub struct Repl {
    reader: rustyline::Editor<()>,
    history_path: Option<PathBuf>,
    driver: Driver,
}

impl Repl {
    pub fn new(history_path: Option<PathBuf>, driver: Driver) -> Result<Self, DriverErr> {
        let reader = rustyline::Editor::<()>::new().map_err(|err| {
            let msg = format!("Could not initialize readline: {err}");
            DriverErr::new(DriverErrKind::ReplErr(msg))
        })?;
        Ok(Repl { reader, history_path, driver })
    }

    pub fn run(&mut self) -> DriverResult {
        println!("Welcome to the Simian REPL (read/eval/print loop)");
        println!("Type a line of code, then hit Enter to evaluate it");
        self.load_history();
        println!("Type .help for help or .exit to exit");

        loop {
            match self.read_line(">> ", true) {
                Ok(None) => {
                    // Blank or all-whitespace line.
                }
                Ok(Some(input)) => {
                    // Evaluate the input. If eval returns a result of
                    // any kind (ok or err), shut down the REPL.
                    if let Some(result) = self.eval(input.as_str(), true) {
                        break result;
                    }
                }
                // User hit Ctrl-C
                Err(ReadlineError::Interrupted) => {
                    println!("Use Ctrl-D or .exit to exit");
                }
                // User hit Ctrl-D
                Err(ReadlineError::Eof) => {
                    break Ok(None);
                }
                // Unexpected error encountered while attempting to read
                // a line.
                Err(err) => {
                    let msg = format!("Could not read line: {err}");
                    break Err(DriverErr::new(DriverErrKind::ReplErr(msg)));
                }
            }
        }
    }

    /// Get a line of input from the user. If the line comprises only
    /// whitespace *and* `trim_blank` is set, `None` will be returned.
    fn read_line(
        &mut self,
        prompt: &str,
        trim_blank: bool,
    ) -> Result<Option<String>, ReadlineError> {
        match self.reader.readline(prompt) {
            Ok(input) if trim_blank && input.trim().is_empty() => Ok(None),
            Ok(input) => Ok(Some(input)),
            Err(err) => Err(err),
        }
    }

    /// Evaluate text. Returns `None` to indicate to the main loop to
    /// continue reading and evaluating input. Returns a `DriverResult`
    /// to indicate to the main loop to exit.
    pub fn eval(&mut self, text: &str, continue_on_err: bool) -> Option<DriverResult> {
        self.add_history_entry(text);

        if matches!(text.trim(), ".exit" | ".quit") {
            return Some(Ok(None));
        } else if self.handle_command(text) {
            return None;
        }

        match self.driver.execute_repl(text) {
            Ok(Some(obj)) => {
                println!("{obj}");
                return None;
            }
            Ok(None) => return None,
            Err(err) => {
                let incomplete = self.is_incomplete(&err);
                if !(continue_on_err && incomplete) {
                    // The driver reports everything except these.
                    if incomplete
                        || matches!(
                            &err.kind,
                            DriverErrKind::CouldNotReadSourceFile(_)
                                | DriverErrKind::ReplErr(_)
                        )
                    {
                        eprintln!("{err}");
                    }
                    return None;
                }
            }
        }

        // The input ended inside a block or group. Keep adding lines
        // until it parses or a blank line is entered.
        let mut input = text.to_owned();
        match self.read_line("+  ", false) {
            Ok(Some(new_input)) if !new_input.trim().is_empty() => {
                input.push('\n');
                input.push_str(new_input.as_str());
                self.eval(input.as_str(), true)
            }
            Ok(_) => self.eval(input.as_str(), false),
            Err(err) => {
                let msg = format!("{err}");
                Some(Err(DriverErr::new(DriverErrKind::ReplErr(msg))))
            }
        }
    }

    fn handle_command(&mut self, text: &str) -> bool {
        match text.trim() {
            "?" | ".help" => {
                eprintln!("{:=>72}", "");
                eprintln!("Simian Help");
                eprintln!("{:->72}", "");
                eprintln!(".help      -> show this help");
                eprintln!(".exit      -> exit (.quit works too)");
                eprintln!(".dis       -> disassemble the last entry");
                eprintln!(".constants -> show the last entry's constants");
                eprintln!(".stack     -> show VM stack (top first)");
                eprintln!("{:=>72}", "");
            }
            ".dis" => match self.driver.bytecode() {
                Some(bytecode) => {
                    print!("{}", Disassembler::new().format_instructions(bytecode))
                }
                None => eprintln!("Nothing has been compiled yet"),
            },
            ".constants" => match self.driver.bytecode() {
                Some(bytecode) => print!("{}", Disassembler::new().format_constants(bytecode)),
                None => eprintln!("Nothing has been compiled yet"),
            },
            ".stack" => {
                self.driver.display_stack();
            }
            _ => return false,
        }
        true
    }

    fn is_incomplete(&self, err: &DriverErr) -> bool {
        matches!(&err.kind, DriverErrKind::ParseErr(kind) if kind.is_incomplete())
    }

    fn load_history(&mut self) {
        if let Some(path) = &self.history_path {
            println!("REPL history will be saved to {}", path.to_string_lossy());
            if let Some(dir) = path.parent() {
                if let Err(err) = fs::create_dir_all(dir) {
                    eprintln!("Could not create REPL history directory: {err}");
                }
            }
            if path.exists() {
                if let Err(err) = self.reader.load_history(path.as_path()) {
                    eprintln!("Could not load REPL history: {err}");
                }
            }
            log::debug!("loaded REPL history from {}", path.display());
        }
    }

    fn add_history_entry(&mut self, input: &str) {
        if let Some(path) = &self.history_path {
            self.reader.add_history_entry(input);
            if let Err(err) = self.reader.save_history(path.as_path()) {
                eprintln!("WARNING: Could not save REPL history: {err}");
            }
        }
    }
}
