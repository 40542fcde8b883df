//! Core data structures for TASM.
//!
//! This crate contains:
//! - The error-kind taxonomy shared by every other crate
//! - A block-aligned growable byte buffer
//! - The guarded stack container and the registry that hands out its handles

pub mod aligned;
pub mod error;
pub mod stack;

pub use aligned::{AlignedBuf, MAX_ALIGN};
pub use error::ErrorKind;
pub use stack::{
    CopyFn, Corruption, ElementLayout, GUARD, GuardedStack, INITIAL_CAPACITY, PrintFn,
    SHRINK_THRESHOLD, StackElement, StackError, StackHandle, StackRegistry, StackSpec, emit_block,
};
