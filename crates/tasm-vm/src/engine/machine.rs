//! Machine state: register files, RAM, framebuffer and the two stacks.

use tasm_bytecode::Cell;
use tasm_core::{StackError, StackHandle, StackRegistry, StackSpec};
use tracing::debug;

use super::error::RuntimeError;

pub const INT_REGISTERS: usize = 16;
pub const FLOAT_REGISTERS: usize = 8;
pub const RAM_CELLS: usize = 128;
pub const SCREEN_WIDTH: usize = 256;
pub const SCREEN_HEIGHT: usize = 64;

/// Framebuffer fill byte.
pub const BLANK: u8 = b' ';

const OPERAND_STACK: &str = "operand";
const RETURN_STACK: &str = "return";

/// Everything an instruction can observe or change, except the program counter.
#[derive(Debug)]
pub struct Machine {
    pub(crate) x: [i64; INT_REGISTERS],
    pub(crate) fx: [f64; FLOAT_REGISTERS],
    pub(crate) ram: [Cell; RAM_CELLS],
    pub(crate) vram: Vec<u8>,
    stacks: StackRegistry,
    operands: StackHandle,
    returns: StackHandle,
}

impl Machine {
    pub fn new() -> Result<Self, StackError> {
        let mut stacks = StackRegistry::new();
        let operands = stacks.create(StackSpec::of::<Cell>(OPERAND_STACK))?;
        let returns = stacks.create(StackSpec::of::<Cell>(RETURN_STACK))?;

        Ok(Self {
            x: [0; INT_REGISTERS],
            fx: [0.0; FLOAT_REGISTERS],
            ram: [Cell::ZERO; RAM_CELLS],
            vram: vec![BLANK; SCREEN_WIDTH * SCREEN_HEIGHT],
            stacks,
            operands,
            returns,
        })
    }

    pub fn registers(&self) -> &[i64; INT_REGISTERS] {
        &self.x
    }

    pub fn float_registers(&self) -> &[f64; FLOAT_REGISTERS] {
        &self.fx
    }

    pub fn ram(&self) -> &[Cell; RAM_CELLS] {
        &self.ram
    }

    /// Row-major framebuffer bytes, `SCREEN_WIDTH` per row.
    pub fn framebuffer(&self) -> &[u8] {
        &self.vram
    }

    pub fn operand_depth(&self) -> usize {
        self.stacks.len(self.operands).unwrap_or_default()
    }

    pub fn return_depth(&self) -> usize {
        self.stacks.len(self.returns).unwrap_or_default()
    }

    pub(crate) fn push(&mut self, value: Cell) -> Result<(), RuntimeError> {
        Ok(self.stacks.push_value(self.operands, &value)?)
    }

    pub(crate) fn pop(&mut self) -> Result<Cell, RuntimeError> {
        self.stacks
            .pop_value(self.operands)
            .map_err(underflow(OPERAND_STACK))
    }

    pub(crate) fn top(&self) -> Result<Cell, RuntimeError> {
        self.stacks
            .top_value(self.operands)
            .map_err(underflow(OPERAND_STACK))
    }

    pub(crate) fn push_int(&mut self, value: i64) -> Result<(), RuntimeError> {
        self.push(Cell::from_i64(value))
    }

    pub(crate) fn pop_int(&mut self) -> Result<i64, RuntimeError> {
        self.pop().map(Cell::as_i64)
    }

    pub(crate) fn push_float(&mut self, value: f64) -> Result<(), RuntimeError> {
        self.push(Cell::from_f64(value))
    }

    pub(crate) fn pop_float(&mut self) -> Result<f64, RuntimeError> {
        self.pop().map(Cell::as_f64)
    }

    pub(crate) fn push_return(&mut self, addr: usize) -> Result<(), RuntimeError> {
        Ok(self
            .stacks
            .push_value(self.returns, &Cell::from_u64(addr as u64))?)
    }

    pub(crate) fn pop_return(&mut self) -> Result<u64, RuntimeError> {
        self.stacks
            .pop_value::<Cell>(self.returns)
            .map(Cell::as_u64)
            .map_err(underflow(RETURN_STACK))
    }

    /// Index into the integer register file.
    pub(crate) fn int_register(&self, index: Cell) -> Result<usize, RuntimeError> {
        checked_index(index.as_u64(), INT_REGISTERS)
    }

    pub(crate) fn float_register(&self, index: Cell) -> Result<usize, RuntimeError> {
        checked_index(index.as_u64(), FLOAT_REGISTERS)
    }

    /// RAM slot addressed by the integer register named in `reg`.
    pub(crate) fn ram_addr(&self, reg: Cell) -> Result<usize, RuntimeError> {
        let addr = self.x[self.int_register(reg)?];
        usize::try_from(addr)
            .ok()
            .filter(|&a| a < RAM_CELLS)
            .ok_or(RuntimeError::RamOutOfRange {
                addr,
                limit: RAM_CELLS,
            })
    }

    /// Framebuffer byte addressed by the integer register named in `reg`.
    pub(crate) fn vram_addr(&self, reg: Cell) -> Result<usize, RuntimeError> {
        let addr = self.x[self.int_register(reg)?];
        usize::try_from(addr)
            .ok()
            .filter(|&a| a < self.vram.len())
            .ok_or(RuntimeError::FramebufferOutOfRange {
                addr,
                limit: self.vram.len(),
            })
    }

    pub(crate) fn clear_framebuffer(&mut self) {
        self.vram.fill(BLANK);
    }

    pub(crate) fn operand_dump(&self) -> String {
        self.stack_dump(self.operands)
    }

    pub(crate) fn return_dump(&self) -> String {
        self.stack_dump(self.returns)
    }

    fn stack_dump(&self, handle: StackHandle) -> String {
        self.stacks
            .render_dump(handle)
            .unwrap_or_else(|err| format!("stack {handle}: {err}"))
    }
}

impl Drop for Machine {
    fn drop(&mut self) {
        for handle in [self.returns, self.operands] {
            if let Err(err) = self.stacks.destroy(handle) {
                debug!(%handle, "stack teardown skipped: {err}");
            }
        }
    }
}

fn checked_index(index: u64, limit: usize) -> Result<usize, RuntimeError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < limit)
        .ok_or(RuntimeError::RegisterOutOfRange { index, limit })
}

fn underflow(stack: &'static str) -> impl FnOnce(StackError) -> RuntimeError {
    move |err| match err {
        StackError::Empty => RuntimeError::StackUnderflow(stack),
        other => other.into(),
    }
}

#[cfg(test)]
#[path = "machine_tests.rs"]
mod machine_tests;
