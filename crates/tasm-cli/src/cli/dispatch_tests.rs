//! Tests for CLI dispatch logic.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use tracing::Level;

use super::*;

fn os(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

#[test]
fn assembler_extracts_paths_and_log_defaults() {
    let m = assembler_command()
        .try_get_matches_from(["tasm", "--infile", "prog.asm", "--outfile", "prog.bin"])
        .unwrap();

    let params = AssembleParams::from_matches(&m);
    assert_eq!(params.infile, PathBuf::from("prog.asm"));
    assert_eq!(params.outfile, PathBuf::from("prog.bin"));

    let log = LogParams::from_matches(&m);
    assert_eq!(log.file, PathBuf::from("log.log"));
    assert_eq!(log.level, Level::DEBUG);
}

#[test]
fn assembler_requires_both_files() {
    let err = assembler_command()
        .try_get_matches_from(["tasm", "--infile", "prog.asm"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn repeated_flag_is_rejected() {
    let result = assembler_command().try_get_matches_from([
        "tasm", "--infile", "a.asm", "--infile", "b.asm", "--outfile", "x.bin",
    ]);
    assert!(result.is_err());
}

#[test]
fn executor_trace_and_log_level() {
    let m = executor_command()
        .try_get_matches_from([
            "tasm-exec",
            "--infile",
            "prog.bin",
            "--trace",
            "--log-level",
            "info",
            "--log-file=run.log",
        ])
        .unwrap();

    let params = ExecuteParams::from_matches(&m);
    assert_eq!(params.infile, PathBuf::from("prog.bin"));
    assert!(params.trace);

    let log = LogParams::from_matches(&m);
    assert_eq!(log.level, Level::INFO);
    assert_eq!(log.file, PathBuf::from("run.log"));
}

#[test]
fn executor_trace_defaults_off() {
    let m = executor_command()
        .try_get_matches_from(["tasm-exec", "--infile", "prog.bin"])
        .unwrap();
    assert!(!ExecuteParams::from_matches(&m).trace);
}

#[test]
fn unknown_log_level_is_rejected() {
    let err = executor_command()
        .try_get_matches_from(["tasm-exec", "--infile", "p.bin", "--log-level", "loud"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn partition_splits_off_undeclared_arguments() {
    let cmd = assembler_command();
    let (known, unknown) = partition_args(
        &cmd,
        os(&[
            "tasm",
            "--verbose",
            "--infile",
            "prog.asm",
            "stray",
            "--outfile=prog.bin",
            "--log-level",
            "warn",
        ]),
    );

    assert_eq!(
        known,
        os(&[
            "tasm",
            "--infile",
            "prog.asm",
            "--outfile=prog.bin",
            "--log-level",
            "warn"
        ])
    );
    assert_eq!(unknown, os(&["--verbose", "stray"]));
}

#[test]
fn partition_keeps_flags_without_values() {
    let cmd = executor_command();
    let (known, unknown) = partition_args(&cmd, os(&["tasm-exec", "--trace", "--infile", "p.bin"]));
    assert_eq!(known, os(&["tasm-exec", "--trace", "--infile", "p.bin"]));
    assert!(unknown.is_empty());
}

#[test]
fn parse_tolerates_unknown_arguments() {
    let (m, unknown) = parse(
        executor_command(),
        os(&["tasm-exec", "--fast", "--infile", "p.bin"]),
    )
    .unwrap();
    assert_eq!(
        ExecuteParams::from_matches(&m).infile,
        PathBuf::from("p.bin")
    );
    assert_eq!(unknown, os(&["--fast"]));
}

#[test]
fn help_is_not_a_failure() {
    let err = parse(assembler_command(), os(&["tasm", "--help"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    assert!(!err.use_stderr());
}
