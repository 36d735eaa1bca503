use std::path::{Path, PathBuf};
use std::process::ExitCode;

use simian_driver::{Driver, DriverErrKind, DriverResult};
use simian_vm::DEFAULT_STACK_SIZE;

mod cli;
mod repl;


fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();

    let debug = matches.get_flag("debug");
    init_logger(debug);

    let dis = matches.get_flag("dis");
    let stack_size =
        matches.get_one::<usize>("stack_size").copied().unwrap_or(DEFAULT_STACK_SIZE);
    let file_name = matches.get_one::<String>("FILE_NAME");
    let code = matches.get_one::<String>("code");

    log::debug!("stack size: {stack_size}");

    let result = if let Some(code) = code {
        let mut driver = Driver::new(stack_size, false, dis, debug);
        print_result(driver.execute_text(code))
    } else if let Some(file_name) = file_name {
        let mut driver = Driver::new(stack_size, false, dis, debug);
        if file_name == "-" {
            print_result(driver.execute_stdin())
        } else {
            print_result(driver.execute_file(Path::new(file_name)))
        }
    } else {
        let history_path = if matches.get_flag("no_history") {
            None
        } else {
            matches.get_one::<String>("history_path").and_then(|path| expand_path(path))
        };
        let driver = Driver::new(stack_size, true, dis, debug);
        repl::Repl::new(history_path, driver).and_then(|mut repl| repl.run())
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            // Other errors are reported by the driver.
            if matches!(
                err.kind,
                DriverErrKind::CouldNotReadSourceFile(_) | DriverErrKind::ReplErr(_)
            ) {
                eprintln!("{err}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}

/// `RUST_LOG` controls logging unless debug mode is on, in which case
/// everything at debug level and up is shown.
fn init_logger(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// Print the value of the last expression statement, if there is one.
fn print_result(result: DriverResult) -> DriverResult {
    if let Ok(Some(obj)) = &result {
        println!("{obj}");
    }
    result
}

/// Expand leading ~ to user home directory.
fn expand_path(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => Some(home.join(rest)),
            None => {
                eprintln!("Could not determine home directory; REPL history disabled");
                None
            }
        },
        None => Some(PathBuf::from(path)),
    }
}
