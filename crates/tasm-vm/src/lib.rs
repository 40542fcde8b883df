//! Runtime VM for executing TASM binaries.
//!
//! This crate provides the register/stack machine that loads a validated
//! [`Program`](tasm_bytecode::Program) and runs its fetch-decode-dispatch loop.

pub mod engine;

pub use engine::{
    BLANK, FLOAT_REGISTERS, INT_REGISTERS, Machine, RAM_CELLS, RuntimeError,
    SCREEN_HEIGHT, SCREEN_WIDTH, VM, VMBuilder, dump,
};
