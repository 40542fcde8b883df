use std::path::PathBuf;

use tasm_bytecode::ProgramError;
use tasm_compiler::{AsmError, Pass};
use tasm_vm::RuntimeError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read `{}`: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Assemble(#[from] AsmError),

    #[error("cannot load `{}`: {source}", path.display())]
    Load { path: PathBuf, source: ProgramError },

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl CliError {
    /// Uppercase one-liner the binaries print on stdout.
    pub fn summary(&self) -> String {
        match self {
            CliError::Open { .. } => "CAN'T OPEN FILE!".to_string(),
            CliError::Write { .. } => "CAN'T WRITE FILE!".to_string(),
            CliError::Assemble(AsmError::CodeTooLarge(_)) => "BODY TOO LARGE!".to_string(),
            CliError::Assemble(err) => match err.pass() {
                Some(Pass::First) => "FIRST PASS FAILED!".to_string(),
                Some(Pass::Second) | None => "SECOND PASS FAILED!".to_string(),
            },
            CliError::Load { .. } => "INPUT FILE ERROR!".to_string(),
            CliError::Runtime(err) => format!("EXEC ERROR: {}", err.kind().label()),
        }
    }
}
