//! Jumps, calls and returns.

use std::io::{BufRead, Write};

use tracing::debug;

use tasm_bytecode::Cell;

use super::error::RuntimeError;
use super::vm::VM;

impl<I: BufRead, O: Write> VM<'_, I, O> {
    /// A target equal to the code length is valid and ends the run.
    fn target(&self, target: u64) -> Result<usize, RuntimeError> {
        usize::try_from(target)
            .ok()
            .filter(|&t| t <= self.code.len())
            .ok_or(RuntimeError::JumpOutOfRange {
                target,
                len: self.code.len(),
            })
    }

    pub(super) fn jump(&mut self, target: Cell) -> Result<(), RuntimeError> {
        self.pc = self.target(target.as_u64())?;
        Ok(())
    }

    /// Pops `rhs` then `lhs` and jumps when `cmp(lhs, rhs)` holds.
    pub(super) fn jump_if(
        &mut self,
        target: Cell,
        cmp: fn(i64, i64) -> bool,
    ) -> Result<(), RuntimeError> {
        let target = self.target(target.as_u64())?;
        let rhs = self.machine.pop_int()?;
        let lhs = self.machine.pop_int()?;
        if cmp(lhs, rhs) {
            self.pc = target;
        }
        Ok(())
    }

    /// Pushes the address after the `CALL`, not the target.
    pub(super) fn call(&mut self, target: Cell) -> Result<(), RuntimeError> {
        let target = self.target(target.as_u64())?;
        self.machine.push_return(self.pc)?;
        debug!(ret = self.pc, target, "call");
        self.pc = target;
        Ok(())
    }

    pub(super) fn ret(&mut self) -> Result<(), RuntimeError> {
        let addr = self.machine.pop_return()?;
        self.pc = self.target(addr)?;
        debug!(pc = self.pc, "return");
        Ok(())
    }
}
