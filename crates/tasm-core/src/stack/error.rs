use crate::error::ErrorKind;

use super::registry::StackHandle;

/// Errors reported by stack and registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    #[error("invalid stack handle {0}")]
    InvalidHandle(StackHandle),

    #[error("element size must be non-zero")]
    ZeroElementSize,

    #[error("alignment {0} is not a power of two up to 16")]
    BadAlignment(usize),

    #[error("stride {stride} cannot hold {size}-byte elements aligned to {align}")]
    BadStride {
        stride: usize,
        size: usize,
        align: usize,
    },

    #[error("stack `{0}` has no element printer")]
    MissingPrinter(String),

    #[error("element is {actual} bytes, stack holds {expected}-byte elements")]
    ElementSize { expected: usize, actual: usize },

    #[error("element of {0} bytes exceeds the inline copy limit")]
    ElementTooLarge(usize),

    #[error("stack is empty")]
    Empty,

    #[error("cannot allocate {bytes} bytes of stack storage")]
    Alloc { bytes: usize },

    #[error("stack corrupted: {0}")]
    Corrupt(#[from] Corruption),
}

impl StackError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StackError::InvalidHandle(_)
            | StackError::ZeroElementSize
            | StackError::BadAlignment(_)
            | StackError::BadStride { .. }
            | StackError::MissingPrinter(_)
            | StackError::ElementSize { .. }
            | StackError::ElementTooLarge(_) => ErrorKind::BadArgument,
            StackError::Empty | StackError::Corrupt(_) => ErrorKind::Corruption,
            StackError::Alloc { .. } => ErrorKind::Allocation,
        }
    }
}

/// First broken invariant found by [`GuardedStack::verify`](super::GuardedStack::verify).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Corruption {
    #[error("element size is zero")]
    ZeroElementSize,

    #[error("alignment {0} is not a power of two")]
    BadAlignment(usize),

    #[error("stride {stride} is smaller than element size {size}")]
    StrideTooSmall { stride: usize, size: usize },

    #[error("stride {stride} is not a multiple of alignment {align}")]
    StrideMisaligned { stride: usize, align: usize },

    #[error("size {size} exceeds capacity {capacity}")]
    SizeOverCapacity { size: usize, capacity: usize },

    #[error("capacity {capacity} disagrees with allocation state (allocated: {allocated})")]
    AllocationState { capacity: usize, allocated: bool },

    #[error("storage holds {actual} bytes, capacity needs {expected}")]
    StorageLength { expected: usize, actual: usize },

    #[error("storage address {addr:#x} is not aligned to {align}")]
    Misaligned { addr: usize, align: usize },

    #[error("head guard is {0:#018x}")]
    HeadGuard(u64),

    #[error("tail guard is {0:#018x}")]
    TailGuard(u64),
}
