use bench_compare::cli::{Cli, compare};
use bench_compare::logging::init_logging;
use bench_compare::{CompareError, StructuredError};
use clap::Parser;
use std::io::{self, IsTerminal};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Err(e) = compare::execute(&cli) {
        handle_error(&e, cli.json);
    }
}

/// Report a fatal error on stderr and exit with its category's code.
///
/// JSON when --json is set, otherwise human-readable with color if stderr is
/// a terminal.
fn handle_error(err: &CompareError, json_mode: bool) -> ! {
    let structured = StructuredError::from_error(err);
    let exit_code = structured.code.exit_code();

    if json_mode {
        let json = structured.to_json();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        );
    } else {
        let use_color = io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        eprintln!("{}", structured.to_human(use_color));
    }

    std::process::exit(exit_code);
}
