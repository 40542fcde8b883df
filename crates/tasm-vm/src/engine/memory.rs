//! Register transfer, RAM and framebuffer access.
//!
//! Register and address checks run before the operand stack is touched.

use std::io::{BufRead, Write};

use tasm_bytecode::Cell;

use super::error::RuntimeError;
use super::vm::VM;

impl<I: BufRead, O: Write> VM<'_, I, O> {
    pub(super) fn push_register(&mut self, reg: Cell) -> Result<(), RuntimeError> {
        let index = self.machine.int_register(reg)?;
        self.machine.push_int(self.machine.x[index])
    }

    pub(super) fn pop_register(&mut self, reg: Cell) -> Result<(), RuntimeError> {
        let index = self.machine.int_register(reg)?;
        self.machine.x[index] = self.machine.pop_int()?;
        Ok(())
    }

    pub(super) fn push_float_register(&mut self, reg: Cell) -> Result<(), RuntimeError> {
        let index = self.machine.float_register(reg)?;
        self.machine.push_float(self.machine.fx[index])
    }

    pub(super) fn pop_float_register(&mut self, reg: Cell) -> Result<(), RuntimeError> {
        let index = self.machine.float_register(reg)?;
        self.machine.fx[index] = self.machine.pop_float()?;
        Ok(())
    }

    pub(super) fn push_ram(&mut self, reg: Cell) -> Result<(), RuntimeError> {
        let addr = self.machine.ram_addr(reg)?;
        self.machine.push(self.machine.ram[addr])
    }

    pub(super) fn pop_ram(&mut self, reg: Cell) -> Result<(), RuntimeError> {
        let addr = self.machine.ram_addr(reg)?;
        self.machine.ram[addr] = self.machine.pop()?;
        Ok(())
    }

    pub(super) fn push_vram(&mut self, reg: Cell) -> Result<(), RuntimeError> {
        let addr = self.machine.vram_addr(reg)?;
        self.machine.push_int(i64::from(self.machine.vram[addr]))
    }

    /// Stores the low byte of the popped value.
    pub(super) fn pop_vram(&mut self, reg: Cell) -> Result<(), RuntimeError> {
        let addr = self.machine.vram_addr(reg)?;
        let value = self.machine.pop_int()?;
        self.machine.vram[addr] = (value & 0xFF) as u8;
        Ok(())
    }
}
