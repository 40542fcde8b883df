use std::process::ExitCode;

use tracing::error;

use tasm_cli::cli::{self, ExecuteParams, LogParams};
use tasm_cli::commands::execute::{self, ExecuteArgs};
use tasm_cli::logging::{self, LogArgs};

fn main() -> ExitCode {
    let (matches, unknown) = match cli::parse(cli::executor_command(), std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(err) => return cli::report_parse_error(&err, "FILE NOT PROVIDED!"),
    };

    let log: LogArgs = LogParams::from_matches(&matches).into();
    logging::init(&log);
    logging::install_panic_hook();
    cli::warn_unknown(&unknown);

    let args: ExecuteArgs = ExecuteParams::from_matches(&matches).into();
    match execute::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            println!("{}", err.summary());
            ExitCode::FAILURE
        }
    }
}
