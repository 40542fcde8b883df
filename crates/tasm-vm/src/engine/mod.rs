//! Execution engine.
//!
//! The VM owns the machine state and an input/output pair; instruction
//! handlers are grouped by concern, one `impl VM` block per module.

mod arith;
mod control;
pub mod dump;
mod error;
mod io;
mod machine;
mod memory;
mod vm;

pub use error::RuntimeError;
pub use machine::{
    BLANK, FLOAT_REGISTERS, INT_REGISTERS, Machine, RAM_CELLS, SCREEN_HEIGHT, SCREEN_WIDTH,
};
pub use vm::{VM, VMBuilder};
