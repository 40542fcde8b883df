mod args;
mod commands;
mod dispatch;

#[cfg(test)]
mod dispatch_tests;

use std::ffi::OsString;
use std::process::ExitCode;

use clap::{ArgMatches, Command};
use tracing::warn;

pub use commands::{assembler_command, executor_command};
pub use dispatch::{AssembleParams, ExecuteParams, LogParams, partition_args};

/// Parse `args` against `cmd`, splitting off undeclared arguments.
pub fn parse<I>(cmd: Command, args: I) -> Result<(ArgMatches, Vec<OsString>), clap::Error>
where
    I: IntoIterator<Item = OsString>,
{
    let (known, unknown) = partition_args(&cmd, args);
    let matches = cmd.try_get_matches_from(known)?;
    Ok((matches, unknown))
}

/// Print a parse failure and pick the exit code.
///
/// Help output is a success; anything else also prints `summary` on stdout.
pub fn report_parse_error(err: &clap::Error, summary: &str) -> ExitCode {
    let _ = err.print();
    if !err.use_stderr() {
        return ExitCode::SUCCESS;
    }
    println!("{summary}");
    ExitCode::FAILURE
}

/// Log each ignored argument. Call after the subscriber is installed.
pub fn warn_unknown(unknown: &[OsString]) {
    for arg in unknown {
        warn!("unknown argument `{}` ignored", arg.to_string_lossy());
    }
}
