use std::process::ExitCode;

use tracing::error;

use tasm_cli::cli::{self, AssembleParams, LogParams};
use tasm_cli::commands::assemble::{self, AssembleArgs};
use tasm_cli::logging::{self, LogArgs};

fn main() -> ExitCode {
    let (matches, unknown) = match cli::parse(cli::assembler_command(), std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(err) => return cli::report_parse_error(&err, "FILES NOT PROVIDED!"),
    };

    let log: LogArgs = LogParams::from_matches(&matches).into();
    logging::init(&log);
    logging::install_panic_hook();
    cli::warn_unknown(&unknown);

    let args: AssembleArgs = AssembleParams::from_matches(&matches).into();
    match assemble::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            println!("{}", err.summary());
            ExitCode::FAILURE
        }
    }
}
