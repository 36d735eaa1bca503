use clap::builder::FalseyValueParser;
use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    let file_name_help = concat!(
        "Script to run. Can be:\n\n",
        "1. a path to a script file\n",
        "2. a single dash to read from stdin\n\n",
        "If neither a script nor --code is given, the REPL is started.",
    );

    Command::new("Simian")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile and run expressions on a stack-based bytecode VM")
        .arg(Arg::new("FILE_NAME").index(1).required(false).help(file_name_help))
        .arg(
            Arg::new("code")
                .short('c')
                .long("code")
                .required(false)
                .num_args(1)
                .allow_hyphen_values(true)
                .conflicts_with("FILE_NAME")
                .help("Use this to run short snippets of code"),
        )
        .arg(
            Arg::new("dis")
                .short('i')
                .long("dis")
                .action(ArgAction::SetTrue)
                .help("Disassemble instructions before running them?"),
        )
        .arg(
            Arg::new("stack_size")
                .short('s')
                .long("stack-size")
                .default_value("2048")
                .value_parser(value_parser!(usize))
                .env("SIMIAN_STACK_SIZE")
                .help("Operand stack capacity in slots"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .value_parser(FalseyValueParser::new())
                .env("SIMIAN_DEBUG")
                .help("Enable debug mode?"),
        )
        .arg(
            Arg::new("history_path")
                .long("history-path")
                .required(false)
                .num_args(1)
                .default_value("~/.config/simian/repl-history")
                .help("Path to REPL history file"),
        )
        .arg(
            Arg::new("no_history")
                .long("no-history")
                .action(ArgAction::SetTrue)
                .help("Disable REPL history? [default: history enabled]"),
        )
}
