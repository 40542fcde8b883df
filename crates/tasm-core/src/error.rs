//! Error taxonomy shared by the stack, the assembler and the VM.

use std::fmt;

/// Coarse classification of every failure in the workspace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or out-of-range input to an operation.
    BadArgument,
    /// An internal invariant or the decoded instruction stream is broken.
    Corruption,
    /// Storage growth could not be satisfied.
    Allocation,
}

impl ErrorKind {
    /// Short uppercase tag printed by the binaries on failure.
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::BadArgument => "ERR BAD ARG",
            ErrorKind::Corruption => "ERR CORRUPT",
            ErrorKind::Allocation => "ERR ALLOC",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
