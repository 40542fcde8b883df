use std::fs;

use tasm_bytecode::{Header, Version};

use super::*;

fn binary(dir: &tempfile::TempDir, source: &str) -> ExecuteArgs {
    let infile = dir.path().join("prog.bin");
    fs::write(&infile, tasm_compiler::assemble(source).unwrap()).unwrap();
    ExecuteArgs {
        infile,
        trace: false,
    }
}

fn execute_to_string(args: &ExecuteArgs, input: &str) -> (Result<(), CliError>, String) {
    let mut output = Vec::new();
    let result = execute(args, input.as_bytes(), &mut output);
    (result, String::from_utf8(output).unwrap())
}

#[test]
fn runs_program_to_completion() {
    let dir = tempfile::tempdir().unwrap();
    let args = binary(&dir, "PUSH 2\nPUSH 3\nADD\nOUT\nHLT\n");

    let (result, output) = execute_to_string(&args, "");
    result.unwrap();
    assert_eq!(output, "5\n");
}

#[test]
fn reads_input() {
    let dir = tempfile::tempdir().unwrap();
    let args = binary(&dir, "IN\nSQ\nOUT\n");

    let (result, output) = execute_to_string(&args, "7\n");
    result.unwrap();
    assert_eq!(output, "Waiting for i64 input: 49\n");
}

#[test]
fn runtime_fault_reports_kind() {
    let dir = tempfile::tempdir().unwrap();
    let args = binary(&dir, "PUSH 1\nPUSH 0\nDIV\nOUT\n");

    let (result, output) = execute_to_string(&args, "");
    let err = result.unwrap_err();
    assert_eq!(err.summary(), "EXEC ERROR: ERR BAD ARG");
    assert_eq!(output, "");
}

#[test]
fn trace_mode_runs_the_same() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = binary(&dir, "CALL :f\nOUT\nHLT\n:f\nPUSH 9\nRET\n");
    args.trace = true;

    let (result, output) = execute_to_string(&args, "");
    result.unwrap();
    assert_eq!(output, "9\n");
}

#[test]
fn newer_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let infile = dir.path().join("future.bin");
    let header = Header {
        version: Version { major: 1, minor: 0 },
        ..Header::new(0)
    };
    fs::write(&infile, header.to_bytes()).unwrap();
    let args = ExecuteArgs {
        infile,
        trace: false,
    };

    let (result, _) = execute_to_string(&args, "");
    let err = result.unwrap_err();
    assert!(matches!(err, CliError::Load { .. }));
    assert_eq!(err.summary(), "INPUT FILE ERROR!");
}

#[test]
fn missing_binary_cannot_be_opened() {
    let dir = tempfile::tempdir().unwrap();
    let args = ExecuteArgs {
        infile: dir.path().join("absent.bin"),
        trace: false,
    };

    let (result, _) = execute_to_string(&args, "");
    assert_eq!(result.unwrap_err().summary(), "CAN'T OPEN FILE!");
}
