use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{Level, error};

use tasm_bytecode::Program;
use tasm_vm::VM;

use crate::error::CliError;

pub struct ExecuteArgs {
    pub infile: PathBuf,
    pub trace: bool,
}

/// Execute `infile` against the process's stdin and stdout.
pub fn run(args: &ExecuteArgs) -> Result<(), CliError> {
    execute(args, io::stdin().lock(), io::stdout().lock())
}

pub fn execute<I: BufRead, O: Write>(
    args: &ExecuteArgs,
    input: I,
    output: O,
) -> Result<(), CliError> {
    let bytes = fs::read(&args.infile).map_err(|source| CliError::Open {
        path: args.infile.clone(),
        source,
    })?;
    let program = Program::from_bytes(&bytes).map_err(|source| CliError::Load {
        path: args.infile.clone(),
        source,
    })?;

    let mut vm = VM::builder(&program)
        .io(input, output)
        .trace(args.trace)
        .build()?;

    if let Err(err) = vm.run() {
        error!(pc = vm.pc(), kind = %err.kind(), "{err}");
        vm.dump(Level::ERROR);
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
#[path = "execute_tests.rs"]
mod execute_tests;
