//! Bytecode format and instruction set for TASM.
//!
//! This crate contains:
//! - The tagged 64-bit [`Cell`] every operand and stack slot is made of
//! - The instruction catalog (opcode ↔ mnemonic ↔ operand count)
//! - The binary header and program loader
//! - The instruction codec and human-readable dump renderers

pub mod catalog;
pub mod cell;
pub mod dump;
pub mod header;
pub mod instruction;
pub mod program;

pub use catalog::{
    CATALOG, Descriptor, MAX_MNEMONIC_LEN, MAX_OPERANDS, Opcode, OperandKind, catalog, lookup,
    runtime_version,
};
pub use cell::Cell;
pub use header::{HEADER_SIZE, Header, MAGIC, VERSION, Version};
pub use instruction::{CELL_SIZE, DecodeError, INSTRUCTION_HEADER_SIZE, Instruction};
pub use program::{Program, ProgramError};
