//! Shared argument builders.
//!
//! Each function returns a `clap::Arg` so both binaries compose the same
//! definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Input file (--infile).
pub fn infile_arg(help: &'static str) -> Arg {
    Arg::new("infile")
        .long("infile")
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help(help)
}

/// Output binary (--outfile).
pub fn outfile_arg() -> Arg {
    Arg::new("outfile")
        .long("outfile")
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Binary to write")
}

/// Log sink (--log-file).
pub fn log_file_arg() -> Arg {
    Arg::new("log_file")
        .long("log-file")
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .default_value("log.log")
        .help("Append diagnostics to this file")
}

/// Log verbosity (--log-level).
pub fn log_level_arg() -> Arg {
    Arg::new("log_level")
        .long("log-level")
        .value_name("LEVEL")
        .value_parser(LOG_LEVELS)
        .default_value("debug")
        .help("Most verbose level written to the log")
}

/// State dumps around calls (--trace).
pub fn trace_arg() -> Arg {
    Arg::new("trace")
        .long("trace")
        .action(ArgAction::SetTrue)
        .help("Dump machine state after every CALL and RET")
}
