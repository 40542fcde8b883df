//! Runtime errors for the VM.

use tasm_bytecode::DecodeError;
use tasm_core::{ErrorKind, StackError};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("decode error at {pc:#06x}: {source}")]
    Decode { pc: usize, source: DecodeError },

    #[error("register x{index} out of range (limit {limit})")]
    RegisterOutOfRange { index: u64, limit: usize },

    #[error("RAM address {addr} out of range (0..{limit})")]
    RamOutOfRange { addr: i64, limit: usize },

    #[error("framebuffer address {addr} out of range (0..{limit})")]
    FramebufferOutOfRange { addr: i64, limit: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("jump target {target:#x} outside code of {len} bytes")]
    JumpOutOfRange { target: u64, len: usize },

    #[error("{0} stack underflow")]
    StackUnderflow(&'static str),

    #[error("invalid input `{0}`")]
    Input(String),

    #[error("unexpected end of input")]
    EndOfInput,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Stack(#[from] StackError),
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::Decode { source, .. } => source.kind(),
            RuntimeError::StackUnderflow(_) => ErrorKind::Corruption,
            RuntimeError::Stack(err) => err.kind(),
            RuntimeError::RegisterOutOfRange { .. }
            | RuntimeError::RamOutOfRange { .. }
            | RuntimeError::FramebufferOutOfRange { .. }
            | RuntimeError::DivisionByZero
            | RuntimeError::JumpOutOfRange { .. }
            | RuntimeError::Input(_)
            | RuntimeError::EndOfInput
            | RuntimeError::Io(_) => ErrorKind::BadArgument,
        }
    }
}
