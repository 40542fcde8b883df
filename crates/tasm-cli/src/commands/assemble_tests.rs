use std::fs;

use indoc::indoc;
use tasm_bytecode::{MAGIC, Program};

use super::*;

fn args(dir: &tempfile::TempDir, source: &str) -> AssembleArgs {
    let infile = dir.path().join("prog.asm");
    fs::write(&infile, source).unwrap();
    AssembleArgs {
        infile,
        outfile: dir.path().join("prog.bin"),
    }
}

#[test]
fn writes_binary_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let args = args(&dir, indoc! {"
        PUSH 2
        PUSH 3
        ADD
        OUT
        HLT
    "});

    run(&args).unwrap();

    let image = fs::read(&args.outfile).unwrap();
    assert_eq!(image[..4], MAGIC);
    let program = Program::from_bytes(&image).unwrap();
    assert_eq!(program.code().len(), 26);
}

#[test]
fn first_pass_failure_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let args = args(&dir, "PUSH 1\nBOGUS\n");

    let err = run(&args).unwrap_err();
    assert_eq!(err.summary(), "FIRST PASS FAILED!");
    assert!(!args.outfile.exists());
}

#[test]
fn undefined_label_fails_second_pass() {
    let dir = tempfile::tempdir().unwrap();
    let args = args(&dir, "JMP :nowhere\n");

    let err = run(&args).unwrap_err();
    assert_eq!(err.summary(), "SECOND PASS FAILED!");
    assert!(!args.outfile.exists());
}

#[test]
fn missing_source_cannot_be_opened() {
    let dir = tempfile::tempdir().unwrap();
    let args = AssembleArgs {
        infile: dir.path().join("absent.asm"),
        outfile: dir.path().join("out.bin"),
    };

    let err = run(&args).unwrap_err();
    assert!(matches!(err, CliError::Open { .. }));
    assert_eq!(err.summary(), "CAN'T OPEN FILE!");
}
